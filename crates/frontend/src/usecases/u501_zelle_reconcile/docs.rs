use leptos::prelude::*;

use crate::shared::page_frame::PageFrame;

const ENDPOINTS: &[(&str, &str, &str)] = &[
    (
        "GET",
        "/api/zelle/preview/gmail",
        "Reads recent Zelle notification emails and returns parsed candidates. Nothing is written.",
    ),
    (
        "POST",
        "/api/zelle/reconcile/create-transaction",
        "Records one candidate as a transaction for the chosen member. Repeating the call for the same external ID is harmless.",
    ),
];

/// Static reference for treasurers on how Zelle payments reach the ledger.
#[component]
pub fn ZelleIngestionDocs() -> impl IntoView {
    view! {
        <PageFrame page_id="u501_zelle_docs--docs" category="docs">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Zelle Ingestion"</h1>
                </div>
            </div>

            <div class="page__content docs">
                <section>
                    <h2>"Overview"</h2>
                    <p>
                        "Zelle transfers to the church account produce a notification email in the treasury Gmail inbox. "
                        "The backend reads those emails, extracts the amount, date, sender and memo, and tries to match "
                        "the sender to a member record by email address."
                    </p>
                </section>

                <section>
                    <h2>"Idempotency"</h2>
                    <p>
                        "Each parsed email is given an external ID derived from the Zelle confirmation number. "
                        "Transactions are stored with a unique constraint on that ID, so an email that is read twice "
                        "or submitted twice from the review screen never produces a second transaction. "
                        "A repeated submission is reported as \"Already recorded\"."
                    </p>
                </section>

                <section>
                    <h2>"Reviewing payments"</h2>
                    <ol>
                        <li>"Open Zelle Review. The preview lists every candidate found in the inbox."</li>
                        <li>"Rows marked Unmatched need a member ID typed in before they can be created."</li>
                        <li>"A typed member ID always overrides the automatic match."</li>
                        <li>"Choose the payment type (donation, membership due, tithe, event or other)."</li>
                        <li>"Press Create. The preview refreshes and the row no longer offers creation."</li>
                    </ol>
                    <p>"Rows the server reports as already recorded stay disabled."</p>
                </section>

                <section>
                    <h2>"Endpoints"</h2>
                    <table class="docs__table">
                        <thead>
                            <tr>
                                <th>"Method"</th>
                                <th>"Path"</th>
                                <th>"Behaviour"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {ENDPOINTS.iter().map(|(method, path, text)| view! {
                                <tr>
                                    <td><span class="badge badge--neutral">{*method}</span></td>
                                    <td><code>{*path}</code></td>
                                    <td>{*text}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </section>

                <section>
                    <h2>"Permissions"</h2>
                    <p>
                        "Only roles with financial access see the review screen. The server checks the role again on "
                        "every request; hiding the tab is a convenience, not a safeguard."
                    </p>
                </section>
            </div>
        </PageFrame>
    }
}
