use super::super::Model;
use yew::prelude::*;

pub fn render_preview_area(model: &Model) -> Html {
    let Some(url) = model.session.preview() else {
        return html! {};
    };

    let alt = model
        .session
        .asset()
        .map_or_else(|| "ID Preview".to_string(), |asset| asset.filename.clone());

    html! {
        <div id="preview-container">
            <h3>{"Image Preview:"}</h3>
            <img id="actual-image-preview" src={url.to_string()} alt={alt} />
        </div>
    }
}
