mod api;
mod blob;
mod camera;
mod components;

use api::ApiClient;
use blob::BrowserBlob;
use camera::CameraFeed;
use components::camera_view::render_camera_view;
use components::handlers;
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_file::{File as GlooFile, ObjectUrl};
use idcard_shared::{
    SubmissionTicket, ValidationResult, ValidationSession, ValidatorError, VersionInfo,
};
use yew::prelude::*;

const DEFAULT_USER_ID: &str = "22-733-043";

// Availability of the validation service, checked once on start
enum ServiceStatus {
    Unknown,
    Online(Option<VersionInfo>),
    Offline(String),
}

// Yew msg components
enum Msg {
    // Acquisition
    FileSelected(GlooFile),
    ActivateCamera,
    CameraReady(Result<CameraFeed, String>),
    CaptureFrame,

    // Submission
    UserIdChanged(String),
    Submit,
    SubmissionFinished(SubmissionTicket, Result<ValidationResult, ValidatorError>),

    // UI states
    SetError(Option<String>),
    ServiceChecked(ServiceStatus),
}

// Main component
struct Model {
    session: ValidationSession<BrowserBlob, ObjectUrl>,
    api: ApiClient,
    camera: Option<CameraFeed>,
    video_ref: NodeRef,
    notice: Option<String>,
    service: ServiceStatus,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let model = Self {
            session: ValidationSession::new(DEFAULT_USER_ID),
            api: ApiClient::default(),
            camera: None,
            video_ref: NodeRef::default(),
            notice: None,
            service: ServiceStatus::Unknown,
        };
        handlers::check_service(&model, ctx);
        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => handlers::handle_file_selected(self, ctx, file),
            Msg::ActivateCamera => handlers::handle_activate_camera(self, ctx),
            Msg::CameraReady(feed) => handlers::handle_camera_ready(self, feed),
            Msg::CaptureFrame => handlers::handle_capture_frame(self, ctx),

            Msg::UserIdChanged(user_id) => {
                self.session.set_user_id(user_id);
                false
            }
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::SubmissionFinished(ticket, outcome) => {
                handlers::handle_submission_finished(self, ticket, outcome)
            }

            Msg::SetError(error) => {
                if error.is_none() {
                    self.session.dismiss_error();
                }
                self.notice = error;
                true
            }
            Msg::ServiceChecked(status) => {
                self.service = status;
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        let video = self.video_ref.cast::<web_sys::HtmlVideoElement>();
        if let (Some(feed), Some(video)) = (&self.camera, video) {
            feed.attach(&video);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                { render_upload_section(self, ctx) }
                { render_camera_view(self, ctx) }
                { render_error_message(self, ctx) }
                { render_preview_area(self) }
                { render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{ self.render_service_status() }</p>
                </footer>
            </div>
        }
    }
}

impl Model {
    fn render_service_status(&self) -> String {
        match &self.service {
            ServiceStatus::Unknown => "Checking validation service...".to_string(),
            ServiceStatus::Online(Some(info)) => {
                format!("{} v{} online (updated {})", info.model, info.version, info.last_updated)
            }
            ServiceStatus::Online(None) => "Validation service online".to_string(),
            ServiceStatus::Offline(reason) => format!("Validation service unavailable: {}", reason),
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
