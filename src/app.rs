use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use eframe::egui;
use egui::{Color32, CornerRadius, RichText, Stroke};

use country_explorer::api::{ApiConfig, Client, SearchKind};
use country_explorer::flag::FlagRef;
use country_explorer::presenter::{self, DisplayBundle};
use country_explorer::session::{SearchRequest, SelectRequest, Session};
use country_explorer::{CountryRecord, FetchError};

type SearchResult = Result<Vec<CountryRecord>, FetchError>;

// Theme colors
const SAGE: Color32 = Color32::from_rgb(0x9d, 0xc1, 0x83);
const PALE_SAGE: Color32 = Color32::from_rgb(0xc5, 0xd8, 0xb0);
const HOVER_SAGE: Color32 = Color32::from_rgb(0xa8, 0xc1, 0x93);
const DARK_SAGE: Color32 = Color32::from_rgb(0x3e, 0x4d, 0x34);

const REGION_HINT: &str = "e.g., Europe, Asia, Africa";
const STATUS_BAR_TEXT: &str = "REST Countries API | Country Explorer with Flags";

pub struct App {
    client: Option<Arc<Client>>,
    client_error: Option<String>,
    session: Session,
    name_query: String,
    region_query: String,
    search_rx: Option<Receiver<SearchResult>>,
    search_pending: Option<SearchRequest>,
    display_rx: Option<Receiver<DisplayBundle>>,
    display_pending: Option<SelectRequest>,
    flag_texture: Option<egui::TextureHandle>,
    /// Nothing has been searched yet; the flag area shows its initial hint.
    pristine: bool,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        apply_theme(&cc.egui_ctx);

        let (client, client_error) = match Client::new(ApiConfig::default()) {
            Ok(client) => (Some(Arc::new(client)), None),
            Err(err) => {
                log::error!("HTTP client unavailable: {}", err);
                (None, Some(err.to_string()))
            }
        };

        Self {
            client,
            client_error,
            session: Session::new(),
            name_query: String::new(),
            region_query: String::new(),
            search_rx: None,
            search_pending: None,
            display_rx: None,
            display_pending: None,
            flag_texture: None,
            pristine: true,
        }
    }

    fn busy(&self) -> bool {
        self.search_rx.is_some() || self.display_rx.is_some()
    }

    fn start_search(&mut self, kind: SearchKind) {
        let Some(client) = self.client.clone() else {
            return;
        };

        let raw = match kind {
            SearchKind::Name => self.name_query.clone(),
            SearchKind::Region => self.region_query.clone(),
        };
        let Ok(request) = self.session.begin_search(kind, &raw) else {
            return;
        };
        self.pristine = false;

        // Any display still loading belongs to the previous results.
        self.display_rx = None;
        self.display_pending = None;

        let (tx, rx) = mpsc::channel::<SearchResult>();
        let kind = request.kind;
        let query = request.query.clone();

        std::thread::spawn(move || {
            let result = client.fetch(kind, &query);
            let _ = tx.send(result);
        });

        self.search_rx = Some(rx);
        self.search_pending = Some(request);
    }

    fn poll_search(&mut self) {
        let recv_result = match self.search_rx.as_ref() {
            Some(rx) => rx.try_recv(),
            None => return,
        };

        let outcome = match recv_result {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(FetchError::Transport(
                "Search worker stopped unexpectedly".to_string(),
            )),
        };

        self.search_rx = None;
        let Some(request) = self.search_pending.take() else {
            return;
        };

        if let Some(select) = self.session.finish_search(&request, outcome) {
            self.start_display(select);
        }
    }

    fn select(&mut self, index: usize) {
        if let Some(select) = self.session.begin_select(index) {
            self.start_display(select);
        }
    }

    fn start_display(&mut self, select: SelectRequest) {
        let Some(client) = self.client.clone() else {
            return;
        };

        let (tx, rx) = mpsc::channel::<DisplayBundle>();
        let record = select.record.clone();

        std::thread::spawn(move || {
            let bundle = presenter::present(&record, &*client);
            let _ = tx.send(bundle);
        });

        self.display_rx = Some(rx);
        self.display_pending = Some(select);
    }

    fn poll_display(&mut self, ctx: &egui::Context) {
        let recv_result = match self.display_rx.as_ref() {
            Some(rx) => rx.try_recv(),
            None => return,
        };

        match recv_result {
            Ok(bundle) => {
                self.display_rx = None;
                let Some(select) = self.display_pending.take() else {
                    return;
                };
                let texture = flag_texture(ctx, &bundle.flag);
                if self.session.finish_select(&select, bundle) {
                    self.flag_texture = texture;
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("Display worker stopped unexpectedly");
                self.display_rx = None;
                self.display_pending = None;
            }
        }
    }

    fn clear(&mut self) {
        self.session.clear();
        self.search_rx = None;
        self.search_pending = None;
        self.display_rx = None;
        self.display_pending = None;
        self.flag_texture = None;
        self.name_query.clear();
        self.region_query.clear();
    }

    fn show_search_inputs(&mut self, ui: &mut egui::Ui) -> Option<SearchKind> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Country name?").size(20.0).strong().color(DARK_SAGE));
        });
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.name_query)
                    .desired_width(300.0)
                    .text_color(Color32::BLACK),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button(RichText::new("Search Country").strong()).clicked() || submitted {
                action = Some(SearchKind::Name);
            }
        });

        ui.add_space(14.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Or search by region:")
                    .size(16.0)
                    .strong()
                    .color(DARK_SAGE),
            );
        });
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.region_query)
                    .hint_text(REGION_HINT)
                    .desired_width(300.0)
                    .text_color(Color32::BLACK),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Search by Region").clicked() || submitted {
                action = Some(SearchKind::Region);
            }
        });

        action
    }

    fn show_results_list(&self, ui: &mut egui::Ui) -> Option<usize> {
        let mut clicked = None;

        ui.label(RichText::new("Search Results:").size(14.0).strong().color(DARK_SAGE));
        egui::Frame::new()
            .fill(PALE_SAGE)
            .stroke(Stroke::new(1.0, DARK_SAGE))
            .corner_radius(CornerRadius::same(2))
            .inner_margin(egui::Margin::same(5))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .id_salt("results_scroll")
                    .max_height(72.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        let selected = self.session.selected();
                        for (idx, name) in self.session.country_names().into_iter().enumerate() {
                            let label = RichText::new(name).color(Color32::BLACK).small();
                            if ui.selectable_label(selected == Some(idx), label).clicked() {
                                clicked = Some(idx);
                            }
                        }
                    });
            });

        clicked
    }

    fn show_flag(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            if let Some(texture) = &self.flag_texture {
                ui.add(egui::Image::new(egui::load::SizedTexture::from_handle(texture)));
                return;
            }

            let placeholder = match self.session.display() {
                Some(display) => display.flag.placeholder().unwrap_or_default(),
                None if self.pristine => "Flag will appear here",
                None => "",
            };
            ui.label(RichText::new(placeholder).color(DARK_SAGE));
        });
    }

    fn show_country(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let (headline, color) = match self.session.status() {
                Some(status) => (status, DARK_SAGE),
                None => (self.session.headline().unwrap_or_default(), Color32::BLACK),
            };
            ui.label(RichText::new(headline).size(20.0).strong().color(color));
        });

        let display = self.session.display();
        text_section(
            ui,
            "Country Info:",
            display.map_or("", |d| d.info_block.as_str()),
            160.0,
        );
        text_section(
            ui,
            "Country Details:",
            display.map_or("", |d| d.details_block.as_str()),
            90.0,
        );
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_search();
        self.poll_display(ctx);
        if self.session.display().is_none() {
            self.flag_texture = None;
        }
        if self.busy() {
            ctx.request_repaint();
        }

        let mut search_action: Option<SearchKind> = None;
        let mut select_action: Option<usize> = None;
        let mut clear_action = false;

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(PALE_SAGE)
                    .stroke(Stroke::new(1.0, DARK_SAGE))
                    .inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(STATUS_BAR_TEXT).small().color(DARK_SAGE));
                    if self.busy() {
                        ui.spinner();
                    }
                    if let Some(err) = &self.client_error {
                        ui.label(
                            RichText::new(format!("HTTP client unavailable: {}", err))
                                .small()
                                .color(Color32::from_rgb(160, 40, 40)),
                        );
                    }
                });
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(SAGE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("main_scroll")
                    .show(ui, |ui| {
                        search_action = self.show_search_inputs(ui);

                        ui.add_space(14.0);
                        ui.vertical_centered(|ui| {
                            if ui.button(RichText::new("Clear Display").strong()).clicked() {
                                clear_action = true;
                            }
                        });

                        ui.add_space(10.0);
                        select_action = self.show_results_list(ui);

                        ui.add_space(10.0);
                        self.show_flag(ui);
                        ui.add_space(10.0);
                        self.show_country(ui);
                    });
            });

        if clear_action {
            self.clear();
        } else if let Some(kind) = search_action {
            self.start_search(kind);
        } else if let Some(idx) = select_action {
            self.select(idx);
        }
    }
}

fn text_section(ui: &mut egui::Ui, heading: &str, body: &str, min_height: f32) {
    ui.add_space(6.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(heading).size(16.0).strong().color(DARK_SAGE));
    });
    egui::Frame::new()
        .fill(PALE_SAGE)
        .corner_radius(CornerRadius::same(2))
        .inner_margin(egui::Margin::same(6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(min_height);
            ui.label(RichText::new(body).color(Color32::BLACK));
        });
}

fn flag_texture(ctx: &egui::Context, flag: &FlagRef) -> Option<egui::TextureHandle> {
    let FlagRef::Image(image) = flag else {
        return None;
    };

    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        [image.width as usize, image.height as usize],
        &image.rgba,
    );
    Some(ctx.load_texture("country_flag", color_image, egui::TextureOptions::LINEAR))
}

fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.dark_mode = false;
    style.visuals.panel_fill = SAGE;
    style.visuals.window_fill = SAGE;
    style.visuals.extreme_bg_color = PALE_SAGE;
    style.visuals.selection.bg_fill = DARK_SAGE;
    style.visuals.widgets.noninteractive.bg_fill = SAGE;
    style.visuals.widgets.inactive.bg_fill = PALE_SAGE;
    style.visuals.widgets.inactive.weak_bg_fill = PALE_SAGE;
    style.visuals.widgets.hovered.bg_fill = HOVER_SAGE;
    style.visuals.widgets.hovered.weak_bg_fill = HOVER_SAGE;
    style.visuals.widgets.active.bg_fill = HOVER_SAGE;
    style.visuals.widgets.active.weak_bg_fill = HOVER_SAGE;
    style.visuals.override_text_color = Some(DARK_SAGE);
    ctx.set_style(style);
}
