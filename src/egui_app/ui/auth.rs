use super::style;
use crate::egui_app::controller::AppController;
use crate::egui_app::state::Screen;
use eframe::egui::{self, Frame, Margin, RichText, Ui};

const FORM_WIDTH: f32 = 320.0;

fn form_card(ui: &mut Ui, title: &str, subtitle: &str, add_contents: impl FnOnce(&mut Ui)) {
    let palette = style::palette();
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        Frame::new()
            .fill(palette.bg_secondary)
            .stroke(style::card_stroke())
            .inner_margin(Margin::same(24))
            .show(ui, |ui| {
                ui.set_width(FORM_WIDTH);
                ui.heading(title);
                ui.label(RichText::new(subtitle).color(palette.text_muted));
                ui.add_space(12.0);
                add_contents(ui);
            });
    });
}

fn labeled_field(ui: &mut Ui, label: &str, value: &mut String, password: bool) -> egui::Response {
    ui.label(label);
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .password(password)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
    response
}

fn submitted(response: &egui::Response, ui: &Ui) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

pub(super) fn render_login(ui: &mut Ui, controller: &mut AppController) {
    let mut submit = false;
    let mut go_register = false;
    form_card(ui, "Sign in", "Enter your credentials to access your account", |ui| {
        let form = &mut controller.ui.login;
        let enabled = !form.submitting;
        ui.add_enabled_ui(enabled, |ui| {
            labeled_field(ui, "Username", &mut form.username, false);
            let password = labeled_field(ui, "Password", &mut form.password, true);
            submit |= submitted(&password, ui);
            let label = if form.submitting { "Signing in..." } else { "Sign in" };
            submit |= ui.button(label).clicked();
        });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Don't have an account?");
            go_register = ui.link("Register").clicked();
        });
    });
    if submit {
        controller.submit_login();
    }
    if go_register {
        controller.navigate(Screen::Register);
    }
}

pub(super) fn render_register(ui: &mut Ui, controller: &mut AppController) {
    let mut submit = false;
    let mut go_login = false;
    form_card(ui, "Create an account", "Enter your details to create your account", |ui| {
        let form = &mut controller.ui.register;
        let enabled = !form.submitting;
        ui.add_enabled_ui(enabled, |ui| {
            labeled_field(ui, "Username", &mut form.username, false);
            labeled_field(ui, "Password", &mut form.password, true);
            let confirm = labeled_field(ui, "Confirm Password", &mut form.confirm, true);
            submit |= submitted(&confirm, ui);
            let label = if form.submitting {
                "Creating account..."
            } else {
                "Register"
            };
            submit |= ui.button(label).clicked();
        });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Already have an account?");
            go_login = ui.link("Sign in").clicked();
        });
    });
    if submit {
        controller.submit_register();
    }
    if go_login {
        controller.navigate(Screen::Login);
    }
}
