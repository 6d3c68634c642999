//! egui window: questionnaire on the left, the stone on the right.

use std::time::Instant;

use eframe::egui;
use tracing::{error, info, warn};

use crate::animation::Controller;
use crate::answer::AnswerStore;
use crate::color::Rgb;
use crate::config::Config;
use crate::questions::{Question, QuestionKind, QUESTIONS};
use crate::report::Report;
use crate::scene::Shape;
use crate::{snapshot, Error};

const WARN_RED: egui::Color32 = egui::Color32::from_rgb(217, 77, 77);
const DIM: egui::Color32 = egui::Color32::from_rgb(160, 160, 150);
const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(86, 166, 96);

enum Notice {
    Error(String),
    Info(String),
}

pub struct MoodStoneApp {
    config: Config,
    answers: AnswerStore,
    controller: Controller,
    report: Option<Report>,
    notice: Option<Notice>,
    /// Questions flagged by the last rejected submission.
    flagged: Vec<u32>,
    last_tick: Instant,
    canvas: egui::Vec2,
}

impl MoodStoneApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, demo: bool) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let controller = Controller::new(config.animation.seed);
        let canvas = egui::vec2(config.window.width, config.window.height);
        let mut app = Self {
            config,
            answers: AnswerStore::default(),
            controller,
            report: None,
            notice: None,
            flagged: Vec::new(),
            last_tick: Instant::now(),
            canvas,
        };
        if demo {
            app.load_demo();
        }
        app
    }

    fn submit(&mut self) {
        match self.answers.to_score_result() {
            Ok(score) => {
                info!(
                    pss = score.pss,
                    life_events = score.life_events,
                    economic = score.economic,
                    aggregate = score.aggregate,
                    "assessment submitted"
                );
                self.controller.submit(&score);
                self.report = Some(Report::new(&score));
                self.flagged.clear();
                self.notice = None;
            }
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, e: Error) {
        warn!(error = %e, "answer rejected");
        self.notice = Some(Notice::Error(match &e {
            Error::IncompleteInput { missing } => {
                self.flagged = missing.clone();
                format!(
                    "Please answer every question first ({} left).",
                    missing.len()
                )
            }
            _ => e.to_string(),
        }));
    }

    fn load_demo(&mut self) {
        info!("loading demo answers");
        match AnswerStore::demo() {
            Ok(answers) => {
                self.answers = answers;
                self.submit();
            }
            Err(e) => self.reject(e),
        }
    }

    fn reset(&mut self) {
        self.answers = AnswerStore::default();
        self.report = None;
        self.notice = None;
        self.flagged.clear();
        self.controller.reset();
    }

    fn save_snapshot(&mut self) {
        let shapes = self.controller.compose(self.canvas);
        let width = self.canvas.x.round().max(1.0) as u32;
        let height = self.canvas.y.round().max(1.0) as u32;
        self.notice = Some(
            match snapshot::save(&shapes, width, height, &self.config.snapshot.directory) {
                Ok(path) => Notice::Info(format!("Saved {}", path.display())),
                Err(e) => {
                    error!(error = %e, "snapshot failed");
                    Notice::Error(e.to_string())
                }
            },
        );
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Mood Stone");
            ui.separator();
            if ui.button("Demo").clicked() {
                self.load_demo();
            }
            if ui.button("Reset").clicked() {
                self.reset();
            }
            if ui.button("Save snapshot").clicked() {
                self.save_snapshot();
            }
            match &self.notice {
                Some(Notice::Error(text)) => {
                    ui.colored_label(WARN_RED, text.as_str());
                }
                Some(Notice::Info(text)) => {
                    ui.colored_label(OK_GREEN, text.as_str());
                }
                None => {}
            }
        });
    }

    fn questionnaire(&mut self, ui: &mut egui::Ui) {
        ui.label(format!(
            "{} of {} answered",
            self.answers.answered(),
            QUESTIONS.len()
        ));
        if ui.button("Submit").clicked() {
            self.submit();
        }
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if let Some(report) = &self.report {
                egui::CollapsingHeader::new("Results")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(report.to_string()).monospace());
                    });
            }
            for scale in &QUESTIONS.scales {
                egui::CollapsingHeader::new(scale.title.as_str())
                    .default_open(self.report.is_none())
                    .show(ui, |ui| {
                        ui.colored_label(DIM, scale.instructions.as_str());
                        for question in &scale.questions {
                            let flagged = self.flagged.contains(&question.id);
                            if let Some(answer) =
                                question_widget(ui, question, self.answers.get(question.id), flagged)
                            {
                                if let Err(e) = self.answers.insert(question.id, answer) {
                                    self.reject(e);
                                } else {
                                    self.flagged.retain(|id| *id != question.id);
                                }
                            }
                        }
                    });
            }
        });
    }

    fn stone(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
        self.canvas = rect.size();
        for shape in self.controller.compose(self.canvas) {
            paint(&painter, rect.min, shape);
        }
    }
}

impl eframe::App for MoodStoneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.controller.stop();
        }

        let now = Instant::now();
        let dt = self.config.animation.frames(now - self.last_tick);
        self.last_tick = now;
        self.controller.tick(dt);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::SidePanel::left("questionnaire")
            .default_width(420.0)
            .resizable(true)
            .show(ctx, |ui| self.questionnaire(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| self.stone(ui));

        if self.controller.is_running() {
            ctx.request_repaint_after(self.config.animation.tick());
        }
    }
}

/// Draws one question and returns the answer picked this frame, if any.
fn question_widget(
    ui: &mut egui::Ui,
    question: &Question,
    current: Option<u8>,
    flagged: bool,
) -> Option<u8> {
    let mut picked = None;
    ui.add_space(4.0);
    let text = format!("{}. {}", question.id, question.text);
    if flagged {
        ui.colored_label(WARN_RED, text.as_str());
    } else {
        ui.label(text);
    }

    ui.horizontal_wrapped(|ui| match &question.kind {
        QuestionKind::Scaled {
            min, max, labels, ..
        } => {
            for value in *min..=*max {
                if ui
                    .selectable_label(current == Some(value), value_label(labels, *min, value))
                    .clicked()
                {
                    picked = Some(value);
                }
            }
        }
        QuestionKind::SingleChoice { options } => {
            for (index, option) in options.iter().enumerate() {
                let index = index as u8;
                if ui
                    .selectable_label(current == Some(index), option.label.as_str())
                    .clicked()
                {
                    picked = Some(index);
                }
            }
        }
        QuestionKind::Numeric {
            min,
            max,
            weight,
            labels,
        } => {
            for value in *min..=*max {
                if ui
                    .selectable_label(current == Some(value), value_label(labels, *min, value))
                    .clicked()
                {
                    picked = Some(value);
                }
            }
            ui.colored_label(DIM, format!("{} pts", weight));
        }
    });
    picked
}

/// Label for `value`, falling back to the number when the bank gives none.
fn value_label(labels: &[String], min: u8, value: u8) -> String {
    labels
        .get(usize::from(value - min))
        .cloned()
        .unwrap_or_else(|| value.to_string())
}

fn color32(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

fn paint(painter: &egui::Painter, origin: egui::Pos2, shape: Shape) {
    match shape {
        Shape::Circle {
            center,
            radius,
            color,
        } => {
            painter.circle_filled(origin + center, radius, color32(color));
        }
        Shape::Line {
            from,
            to,
            width,
            color,
        } => {
            painter.line_segment(
                [origin + from, origin + to],
                egui::Stroke::new(width, color32(color)),
            );
        }
        Shape::Path {
            points,
            width,
            color,
        } => {
            let points = points.into_iter().map(|p| origin + p).collect();
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(width, color32(color)),
            ));
        }
        Shape::Text {
            position,
            text,
            size,
            bold,
            color,
        } => {
            let size = if bold { size * 1.15 } else { size };
            painter.text(
                origin + position,
                egui::Align2::CENTER_CENTER,
                text,
                egui::FontId::proportional(size),
                color32(color),
            );
        }
    }
}
