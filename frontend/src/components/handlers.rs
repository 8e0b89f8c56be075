use super::super::{Model, Msg, ServiceStatus};
use crate::blob::{asset_from_file, asset_from_snapshot};
use crate::camera::CameraFeed;
use gloo_file::File as GlooFile;
use idcard_shared::client::submit;
use idcard_shared::{
    CameraEffect, SubmissionTicket, ValidationResult, ValidationTransport, ValidatorError,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlVideoElement;
use yew::prelude::*;

pub fn handle_file_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let (asset, preview) = asset_from_file(file);
    model.notice = None;
    let effect = model.session.select_file(asset, preview);
    apply_camera_effect(model, ctx, effect);
    true
}

pub fn handle_activate_camera(model: &mut Model, ctx: &Context<Model>) -> bool {
    model.notice = None;
    let effect = model.session.activate_camera();
    apply_camera_effect(model, ctx, effect);
    true
}

pub fn handle_camera_ready(model: &mut Model, feed: Result<CameraFeed, String>) -> bool {
    match feed {
        // The user may have switched to a file while permission was pending.
        Ok(feed) if model.session.is_camera_live() => {
            model.camera = Some(feed);
        }
        Ok(_) => log::debug!("Camera opened after leaving camera mode, releasing it"),
        Err(e) => {
            log::error!("Failed to start camera: {}", e);
            if model.session.camera_unavailable() == CameraEffect::Stop {
                model.camera = None;
            }
            model.notice = Some(format!("Could not start the camera: {}", e));
        }
    }
    true
}

pub fn handle_capture_frame(model: &mut Model, ctx: &Context<Model>) -> bool {
    let snapshot = match (&model.camera, model.video_ref.cast::<HtmlVideoElement>()) {
        (Some(feed), Some(video)) => feed.snapshot(&video),
        _ => None,
    };

    let frame = match snapshot.as_deref().map(asset_from_snapshot) {
        Some(Ok(frame)) => Some(frame),
        Some(Err(e)) => {
            model.session.report_error(e);
            return true;
        }
        None => None,
    };

    let effect = model.session.capture_frame(frame);
    apply_camera_effect(model, ctx, effect);
    true
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    model.notice = None;
    let (ticket, asset) = match model.session.begin_submission() {
        Ok(attempt) => attempt,
        Err(e) => {
            if let Some(window) = web_sys::window() {
                if let Err(js) = window.alert_with_message(&e.to_string()) {
                    log::warn!("Could not show alert: {:?}", js);
                }
            }
            return true;
        }
    };

    let api = model.api;
    let user_id = model.session.user_id().to_string();
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = submit(&api, &user_id, Some(asset)).await;
        link.send_message(Msg::SubmissionFinished(ticket, outcome));
    });
    true
}

pub fn handle_submission_finished(
    model: &mut Model,
    ticket: SubmissionTicket,
    outcome: Result<ValidationResult, ValidatorError>,
) -> bool {
    model.session.finish_submission(ticket, outcome)
}

pub fn check_service(model: &Model, ctx: &Context<Model>) {
    let api = model.api;
    let link = ctx.link().clone();
    spawn_local(async move {
        let status = match api.health().await {
            Ok(health) if health.is_ok() => match api.version().await {
                Ok(info) => ServiceStatus::Online(Some(info)),
                Err(e) => {
                    log::warn!("Version lookup failed: {}", e);
                    ServiceStatus::Online(None)
                }
            },
            Ok(health) => ServiceStatus::Offline(format!("status {}", health.status)),
            Err(e) => {
                log::warn!("Health check failed: {}", e);
                ServiceStatus::Offline(e.to_string())
            }
        };
        link.send_message(Msg::ServiceChecked(status));
    });
}

fn apply_camera_effect(model: &mut Model, ctx: &Context<Model>, effect: CameraEffect) {
    match effect {
        CameraEffect::Keep => {}
        CameraEffect::Stop => {
            model.camera = None;
        }
        CameraEffect::Start => {
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::CameraReady(CameraFeed::open().await));
            });
        }
    }
}
