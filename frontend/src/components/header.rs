use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-id-card"></i> {" College ID Card Validator"}</h1>
            <p class="subtitle">{"Upload a photo of your ID card or take one with your camera"}</p>
        </header>
    }
}
