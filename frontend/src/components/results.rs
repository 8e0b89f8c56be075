use super::super::Model;
use idcard_shared::ValidationReport;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    match model.session.report() {
        Some(report) => render_report(&report),
        None => html! {},
    }
}

fn render_report(report: &ValidationReport) -> Html {
    let verdict_class = match report.value(idcard_shared::report::OUTPUT_LABEL) {
        Some("genuine") => "not-ai",
        Some("fake") => "ai-detected",
        _ => "needs-review",
    };

    html! {
        <div class={classes!("results-container", verdict_class)}>
            <div class="result-header">
                <h3>{"Validation Result"}</h3>
                <p><strong>{"Status: "}</strong>{ &report.status }</p>
                <p><strong>{"Message: "}</strong>{ &report.message }</p>
                <p><strong>{"User ID: "}</strong>{ &report.user_id }</p>
            </div>
            <div class="detailed-results">
                <h4>{"Validation Details:"}</h4>
                <table class="result-table">
                    <tbody>
                        { for report.rows.iter().map(|row| html! {
                            <tr key={row.label}>
                                <td><strong>{ row.label }</strong></td>
                                <td>{ &row.value }</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>
            <h4>{"Extracted Text:"}</h4>
            <pre class="extracted-text">{ &report.extracted_text }</pre>
        </div>
    }
}
