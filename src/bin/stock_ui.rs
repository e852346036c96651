// src/bin/stock_ui.rs

use chrono::Local;
use eframe::egui;
use egui::{Color32, RichText};

use dailystock::client::{Modal, StockApi, StockClient};
use dailystock::vocab::{self, StockStatus};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let api_url =
        std::env::var("STOCK_API_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());

    let mut client = StockClient::new(StockApi::new(api_url));
    client.refresh();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title("Daily Stock Management"),
        ..Default::default()
    };

    eframe::run_native(
        "Daily Stock Management",
        native_options,
        Box::new(|_cc| {
            Box::new(StockUiApp {
                client,
                pending_delete: None,
            })
        }),
    )
}

struct StockUiApp {
    client: StockClient,
    // View-local: id awaiting delete confirmation.
    pending_delete: Option<i64>,
}

impl eframe::App for StockUiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.header(ui);
            ui.separator();
            self.stats_row(ui);
            ui.add_space(4.0);
            self.filter_row(ui);
            if let Some(error) = &self.client.state.error {
                ui.colored_label(Color32::from_rgb(207, 34, 46), format!("⚠ {error}"));
            }
            ui.separator();
            self.stock_table(ui);
        });
        self.modal_window(ctx);
        self.confirm_delete_window(ctx);
    }
}

impl StockUiApp {
    fn header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Daily Stock Management");
            if ui.button("➕ Add stock").clicked() {
                self.client.state.open_add(Local::now().date_naive());
            }
            if ui.button("⟳ Refresh").clicked() {
                self.client.refresh();
            }
        });
    }

    fn stats_row(&self, ui: &mut egui::Ui) {
        let stats = self.client.state.view_stats();
        ui.horizontal(|ui| {
            stat_label(ui, "Total", stats.total, Color32::GRAY);
            stat_label(ui, StockStatus::Normal.label(), stats.normal, status_color(StockStatus::Normal.label()));
            stat_label(ui, StockStatus::Low.label(), stats.low, status_color(StockStatus::Low.label()));
            stat_label(ui, StockStatus::Urgent.label(), stats.urgent, status_color(StockStatus::Urgent.label()));
            stat_label(ui, StockStatus::Inactive.label(), stats.inactive, status_color(StockStatus::Inactive.label()));
        });
    }

    fn filter_row(&mut self, ui: &mut egui::Ui) {
        let mut filters = self.client.state.filters.clone();
        ui.horizontal(|ui| {
            filter_combo(ui, "Category", &mut filters.category, vocab::CATEGORIES);
            filter_combo(ui, "Location", &mut filters.location, vocab::LOCATIONS);
            let statuses: Vec<&str> = StockStatus::ALL.iter().map(|s| s.label()).collect();
            filter_combo(ui, "Status", &mut filters.status, &statuses);
            if !filters.is_empty() && ui.button("✖ Clear filters").clicked() {
                filters.clear();
            }
        });
        // No-op when nothing changed; refetches immediately otherwise.
        self.client.set_filters(filters);
    }

    fn stock_table(&mut self, ui: &mut egui::Ui) {
        if self.client.state.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading…");
            });
            return;
        }
        if self.client.state.stocks.is_empty() {
            ui.label("No stock records found. Try different filters.");
            return;
        }

        let mut edit_target = None;
        let mut delete_target = None;
        {
            let stocks = &self.client.state.stocks;
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("stock_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        for heading in [
                            "ID", "Category", "Status", "Location", "Item", "Unit", "Date",
                            "Quantity", "Actions",
                        ] {
                            ui.strong(heading);
                        }
                        ui.end_row();

                        for record in stocks {
                            ui.label(record.stock_id.to_string());
                            ui.label(&record.category);
                            ui.colored_label(
                                status_color(&record.stock_status),
                                &record.stock_status,
                            );
                            ui.label(&record.location);
                            ui.label(&record.item_name);
                            ui.label(&record.unit);
                            ui.label(record.stock_date.format("%Y-%m-%d").to_string());
                            ui.label(record.quantity.to_string());
                            ui.horizontal(|ui| {
                                if ui.small_button("Edit").clicked() {
                                    edit_target = Some(record.clone());
                                }
                                if ui.small_button("Delete").clicked() {
                                    delete_target = Some(record.stock_id);
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
            ui.label(format!("Showing {} records", stocks.len()));
        }

        if let Some(record) = edit_target {
            self.client.state.open_edit(&record);
        }
        if let Some(stock_id) = delete_target {
            self.pending_delete = Some(stock_id);
        }
    }

    fn modal_window(&mut self, ctx: &egui::Context) {
        let (title, id_editable) = match &self.client.state.modal {
            Modal::Closed => return,
            Modal::Add(_) => ("Add stock", true),
            Modal::Edit { .. } => ("Edit stock", false),
        };

        let mut submit = false;
        let mut close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let form = match &mut self.client.state.modal {
                    Modal::Add(form) => form,
                    Modal::Edit { form, .. } => form,
                    Modal::Closed => return,
                };

                egui::Grid::new("stock_form")
                    .num_columns(2)
                    .min_col_width(120.0)
                    .show(ui, |ui| {
                        ui.label("Stock ID");
                        ui.add_enabled(
                            id_editable,
                            egui::TextEdit::singleline(&mut form.stock_id),
                        );
                        ui.end_row();

                        ui.label("Category");
                        vocab_combo(ui, "form_category", &mut form.category, vocab::CATEGORIES);
                        ui.end_row();

                        ui.label("Status");
                        let statuses: Vec<&str> =
                            StockStatus::ALL.iter().map(|s| s.label()).collect();
                        vocab_combo(ui, "form_status", &mut form.stock_status, &statuses);
                        ui.end_row();

                        ui.label("Location");
                        vocab_combo(ui, "form_location", &mut form.location, vocab::LOCATIONS);
                        ui.end_row();

                        ui.label("Item name");
                        ui.text_edit_singleline(&mut form.item_name);
                        ui.end_row();

                        ui.label("Unit");
                        vocab_combo(ui, "form_unit", &mut form.unit, vocab::UNITS);
                        ui.end_row();

                        ui.label("Date (YYYY-MM-DD)");
                        ui.text_edit_singleline(&mut form.stock_date);
                        ui.end_row();

                        ui.label("Quantity");
                        ui.text_edit_singleline(&mut form.quantity);
                        ui.end_row();
                    });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    if ui.button("💾 Save").clicked() {
                        submit = true;
                    }
                });
            });

        if close {
            self.client.state.close_modal();
        }
        if submit {
            self.client.submit_modal();
        }
    }

    fn confirm_delete_window(&mut self, ctx: &egui::Context) {
        let Some(stock_id) = self.pending_delete else {
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Delete stock")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Delete stock record {stock_id}?"));
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    if ui.button("🗑 Delete").clicked() {
                        confirmed = true;
                    }
                });
            });

        if confirmed {
            self.pending_delete = None;
            self.client.delete(stock_id);
        } else if cancelled {
            self.pending_delete = None;
        }
    }
}

fn stat_label(ui: &mut egui::Ui, label: &str, count: usize, color: Color32) {
    ui.label(RichText::new(format!("{label}: {count}")).color(color).strong());
    ui.add_space(12.0);
}

fn filter_combo(ui: &mut egui::Ui, label: &str, value: &mut Option<String>, options: &[&str]) {
    ui.label(label);
    egui::ComboBox::from_id_source(label)
        .selected_text(value.clone().unwrap_or_else(|| "All".to_string()))
        .show_ui(ui, |ui| {
            ui.selectable_value(value, None, "All");
            for option in options {
                ui.selectable_value(value, Some(option.to_string()), *option);
            }
        });
}

fn vocab_combo(ui: &mut egui::Ui, id: &str, value: &mut String, options: &[&str]) {
    egui::ComboBox::from_id_source(id)
        .selected_text(if value.is_empty() {
            "-- select --".to_string()
        } else {
            value.clone()
        })
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
}

fn status_color(label: &str) -> Color32 {
    match StockStatus::from_label(label) {
        Some(StockStatus::Normal) => Color32::from_rgb(46, 160, 67),
        Some(StockStatus::Low) => Color32::from_rgb(212, 167, 44),
        Some(StockStatus::Urgent) => Color32::from_rgb(207, 34, 46),
        Some(StockStatus::Inactive) => Color32::GRAY,
        None => Color32::from_rgb(219, 109, 40),
    }
}
