use crate::constants::layout::TABLE_HEADER_HEIGHT;
use crate::controller::Dashboard;
use crate::data::{Metric, Record};
use egui_extras::{Column, TableBuilder};

const HEADERS: [&str; 6] = ["Age", "Gender", "Occupation", "Platforms", "Daily time", ""];

fn metric_cell(record: &Record, metric: Metric) -> String {
    record.metric(metric).map(|v| v.to_string()).unwrap_or_default()
}

fn age_cell(record: &Record) -> String {
    record.age.map(|a| a.to_string()).unwrap_or_default()
}

/// Tab-separated rows with a header line, for the clipboard
fn records_tsv(records: &[&Record], metric: Metric) -> String {
    let mut output = String::new();
    let mut header = HEADERS;
    header[5] = metric.label();
    output.push_str(&header.join("\t"));
    output.push('\n');

    for record in records {
        let row = [
            age_cell(record),
            record.gender.to_string(),
            record.occupation.clone(),
            record.platforms.join(", "),
            record.time_bucket.label().to_string(),
            metric_cell(record, metric),
        ];
        output.push_str(&row.join("\t"));
        output.push('\n');
    }
    output
}

fn copy_to_clipboard(text: String) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)
}

/// Table of the records passing the current filters
pub fn render_records_panel(dashboard: &Dashboard, ui: &mut eframe::egui::Ui) {
    profiling::scope!("render_records_table");
    let metric = dashboard.filters().selected_metric();
    let records = dashboard.filtered_records();

    ui.horizontal(|ui| {
        ui.label(format!("{} records", records.len()));
        ui.separator();
        if ui
            .small_button("Copy")
            .on_hover_text("Copy the filtered records as tab-separated text")
            .clicked()
        {
            match copy_to_clipboard(records_tsv(&records, metric)) {
                Ok(()) => tracing::debug!(rows = records.len(), "records copied to clipboard"),
                Err(e) => tracing::warn!(error = %e, "clipboard unavailable"),
            }
        }
    });
    ui.separator();

    let row_height = 18.0;
    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(eframe::egui::Layout::left_to_right(eframe::egui::Align::Center))
        .column(Column::initial(40.0).resizable(false))
        .columns(Column::initial(80.0).resizable(true).clip(true), HEADERS.len())
        .header(TABLE_HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(if title.is_empty() { metric.label() } else { title });
                });
            }
        })
        .body(|body| {
            body.rows(row_height, records.len(), |mut row| {
                let index = row.index();
                let Some(record) = records.get(index) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(format!("{}", index + 1));
                });
                row.col(|ui| {
                    ui.label(age_cell(record));
                });
                row.col(|ui| {
                    ui.label(record.gender.label());
                });
                row.col(|ui| {
                    ui.label(&record.occupation);
                });
                row.col(|ui| {
                    ui.label(record.platforms.join(", "));
                });
                row.col(|ui| {
                    ui.label(record.time_bucket.label());
                });
                row.col(|ui| {
                    ui.strong(metric_cell(record, metric));
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Gender, TimeBucket};

    #[test]
    fn test_records_tsv() {
        let with_value = Record::new(
            Some(21),
            Gender::Female,
            "Student",
            vec!["Instagram".into(), "TikTok".into()],
            TimeBucket::OneToTwo,
        )
        .with_metric(Metric::Depression, Some(4.0));
        let without = Record::new(None, Gender::Other, "Unknown", vec![], TimeBucket::Unknown);

        let tsv = records_tsv(&[&with_value, &without], Metric::Depression);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(Metric::Depression.label()));
        assert_eq!(lines[1], "21\tFemale\tStudent\tInstagram, TikTok\t1-2h\t4");
        assert_eq!(lines[2], "\tOther\tUnknown\t\tUnknown\t");
    }
}
