//! Weekly reports page: list, status changes, deletion and PDF actions.

#[cfg(test)]
#[path = "weekly_reports_test.rs"]
mod weekly_reports_test;

use crate::net::types::{PdfGeneration, ReportStatus, WeeklyReport};

pub(crate) fn period_label(report: &WeeklyReport) -> String {
    format!("{} to {}", report.period_start, report.period_end)
}

/// Forward transition offered for a report, if any.
pub(crate) fn next_status(status: ReportStatus) -> Option<(ReportStatus, &'static str)> {
    match status {
        ReportStatus::Draft => Some((ReportStatus::Submitted, "Submit")),
        ReportStatus::Submitted => Some((ReportStatus::Archived, "Archive")),
        ReportStatus::Archived => None,
    }
}

/// Notice shown after a server-side PDF generation attempt.
pub(crate) fn generation_notice(result: &PdfGeneration) -> String {
    if result.success {
        return match (result.message.is_empty(), result.size) {
            (false, _) => result.message.clone(),
            (true, Some(size)) => format!("PDF generated ({size} bytes)."),
            (true, None) => "PDF generated.".to_owned(),
        };
    }
    result
        .error
        .clone()
        .or_else(|| (!result.message.is_empty()).then(|| result.message.clone()))
        .unwrap_or_else(|| "PDF generation failed.".to_owned())
}

#[cfg(feature = "csr")]
pub use view::WeeklyReportsPage;

#[cfg(feature = "csr")]
mod view {
    use leptos::prelude::*;
    use leptos::task::spawn_local;

    use super::{generation_notice, next_status, period_label};
    use crate::app::AppHandle;
    use crate::components::app_header::AppHeader;
    use crate::net::pdf::{open_bytes_in_new_tab, pdf_filename, save_bytes_as_file};
    use crate::net::types::{Page, ReportStatus, WeeklyReport};
    use crate::pages::error_text;

    #[component]
    pub fn WeeklyReportsPage() -> impl IntoView {
        let app = expect_context::<AppHandle>();

        let reload = RwSignal::new(0_u32);
        let reports = RwSignal::new(None::<Page<WeeklyReport>>);
        let notice = RwSignal::new(None::<String>);

        Effect::new(move || {
            reload.track();
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.weekly_reports.list().await.and_then(|r| r.into_data()) {
                    Ok(page) => reports.set(Some(page)),
                    Err(e) => notice.set(Some(error_text(&e))),
                }
            });
        });

        let refresh = move || reload.update(|n| *n += 1);

        let download = move |report: WeeklyReport| {
            let ctx = app.get_value();
            spawn_local(async move {
                let filename = pdf_filename(&report.period_start, &report.period_end);
                let saved = match ctx.pdf.download(report.id).await {
                    Ok(bytes) => save_bytes_as_file(&bytes, &filename),
                    Err(e) => Err(error_text(&e)),
                };
                if let Err(message) = saved {
                    log::error!("PDF download failed for report {}: {message}", report.id);
                    notice.set(Some(message));
                }
            });
        };

        let preview = move |id: u64| {
            let ctx = app.get_value();
            spawn_local(async move {
                let opened = match ctx.pdf.preview(id).await {
                    Ok(bytes) => open_bytes_in_new_tab(&bytes),
                    Err(e) => Err(error_text(&e)),
                };
                if let Err(message) = opened {
                    log::error!("PDF preview failed for report {id}: {message}");
                    notice.set(Some(message));
                }
            });
        };

        let generate = move |id: u64| {
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.pdf.generate(id).await {
                    Ok(result) => notice.set(Some(generation_notice(&result))),
                    Err(e) => notice.set(Some(error_text(&e))),
                }
            });
        };

        let change_status = move |id: u64, status: ReportStatus| {
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.weekly_reports.update_status(id, status).await.and_then(|r| r.into_data()) {
                    Ok(report) => {
                        log::info!("report {} is now {}", report.id, report.status.as_str());
                        refresh();
                    }
                    Err(e) => notice.set(Some(error_text(&e))),
                }
            });
        };

        let delete = move |id: u64| {
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.weekly_reports.delete(id).await {
                    Ok(_) => refresh(),
                    Err(e) => notice.set(Some(error_text(&e))),
                }
            });
        };

        view! {
            <div class="reports-page">
                <AppHeader/>
                <Show when=move || notice.get().is_some()>
                    <p class="reports-page__notice" on:click=move |_| notice.set(None)>
                        {move || notice.get().unwrap_or_default()}
                    </p>
                </Show>
                <Show when=move || reports.get().is_some() fallback=|| view! { <p>"Loading reports..."</p> }>
                    <table class="reports-table">
                        <thead>
                            <tr>
                                <th>"Period"</th>
                                <th>"Status"</th>
                                <th>"Entries"</th>
                                <th>"Submitted"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                reports
                                    .get()
                                    .map(|p| p.data)
                                    .unwrap_or_default()
                                    .into_iter()
                                    .map(|report| {
                                        let id = report.id;
                                        let transition = next_status(report.status);
                                        let for_download = report.clone();
                                        view! {
                                            <tr>
                                                <td>{period_label(&report)}</td>
                                                <td class=format!("status status--{}", report.status.as_str())>
                                                    {report.status.as_str()}
                                                </td>
                                                <td>{report.entries_count.unwrap_or_default()}</td>
                                                <td>{report.submitted_at.clone().unwrap_or_default()}</td>
                                                <td class="reports-table__actions">
                                                    <button class="btn" on:click=move |_| download(for_download.clone())>"Download PDF"</button>
                                                    <button class="btn" on:click=move |_| preview(id)>"Preview"</button>
                                                    <button class="btn" on:click=move |_| generate(id)>"Generate"</button>
                                                    {transition.map(|(status, label)| view! {
                                                        <button class="btn" on:click=move |_| change_status(id, status)>{label}</button>
                                                    })}
                                                    <button class="btn btn--danger" on:click=move |_| delete(id)>"Delete"</button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </div>
        }
    }
}
