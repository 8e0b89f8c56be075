use super::super::{Model, Msg};
use super::utils::{debounce, first_image_file};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            { render_source_buttons(ctx) }
            { render_user_id_input(model, ctx) }
            { render_selected_file(model) }
            { render_submit_button(model, ctx) }
        </div>
    }
}

fn render_source_buttons(ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_image_file);

        input.set_value("");

        match file {
            Some(file) => Msg::FileSelected(file),
            None => Msg::SetError(Some("No valid image file selected.".into())),
        }
    });

    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <div class="source-buttons">
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <button
                id="upload-button"
                type="button"
                class="analyze-btn"
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <i class="fa-solid fa-upload"></i> {" Upload ID"}
            </button>

            <button
                id="camera-button"
                type="button"
                class="analyze-btn camera-btn"
                onclick={debounce(300, {
                    let link = link.clone();
                    move || link.send_message(Msg::ActivateCamera)
                })}
            >
                <i class="fa-solid fa-camera"></i> {" Take Picture Using Camera"}
            </button>
        </div>
    }
}

fn render_user_id_input(model: &Model, ctx: &Context<Model>) -> Html {
    let handle_input = ctx.link().callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::UserIdChanged(input.value())
    });

    html! {
        <label class="user-id-field">
            <span>{"User ID"}</span>
            <input
                type="text"
                id="user-id"
                value={model.session.user_id().to_string()}
                oninput={handle_input}
            />
        </label>
    }
}

fn render_selected_file(model: &Model) -> Html {
    match model.session.asset() {
        Some(asset) => html! {
            <div class="selected-file">{ format!("Selected File: {}", asset.filename) }</div>
        },
        None => html! {},
    }
}

fn render_submit_button(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();
    let submitting = model.session.is_submitting();

    html! {
        <button
            id="validate-button"
            type="button"
            class="analyze-btn validate-btn"
            disabled={submitting}
            onclick={debounce(300, move || link.send_message(Msg::Submit))}
        >
            {
                if submitting {
                    html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Validating..."}</> }
                } else {
                    html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Validate ID"}</> }
                }
            }
        </button>
    }
}
