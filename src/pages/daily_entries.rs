//! Daily entries page: paginated list, quick add, delete and report creation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated route. Filters and the page number drive a reload; each
//! mutation bumps a reload counter instead of patching the list locally, so
//! the table always shows what the backend returned.

#[cfg(test)]
#[path = "daily_entries_test.rs"]
mod daily_entries_test;

use std::collections::BTreeSet;

use crate::net::types::{Entry, EntryFilters, NewEntry, NewWeeklyReport, Page, User};

pub(crate) const ENTRY_FIELDS_REQUIRED: &str = "Date, PPA, KPI and status are required.";

/// Filters for one page of the list. An empty status means "any".
pub(crate) fn entry_filters(status: &str, page: u32) -> EntryFilters {
    let status = status.trim();
    EntryFilters {
        status: (!status.is_empty()).then(|| status.to_owned()),
        page: Some(page.max(1)),
        ..EntryFilters::default()
    }
}

/// One-line summary under the table.
pub(crate) fn page_summary<T>(page: &Page<T>) -> String {
    if page.total == 0 || page.data.is_empty() {
        return "No entries yet.".to_owned();
    }
    let first = page
        .from
        .unwrap_or_else(|| u64::from(page.current_page.saturating_sub(1)) * u64::from(page.per_page) + 1);
    let last = page.to.unwrap_or(first + page.data.len() as u64 - 1);
    format!("Showing {first}-{last} of {} (page {} of {})", page.total, page.current_page, page.last_page)
}

/// Build a new entry for `user` from the quick-add form.
pub(crate) fn new_entry(
    user: &User,
    entry_date: &str,
    ppa: &str,
    kpi: &str,
    status: &str,
    remarks: &str,
) -> Result<NewEntry, &'static str> {
    let [entry_date, ppa, kpi, status, remarks] = [entry_date, ppa, kpi, status, remarks].map(str::trim);
    if entry_date.is_empty() || ppa.is_empty() || kpi.is_empty() || status.is_empty() {
        return Err(ENTRY_FIELDS_REQUIRED);
    }
    Ok(NewEntry {
        employee_id: user.employee_id.clone(),
        entry_date: entry_date.to_owned(),
        ppa: ppa.to_owned(),
        kpi: kpi.to_owned(),
        status: status.to_owned(),
        remarks: (!remarks.is_empty()).then(|| remarks.to_owned()),
        weekly_report_id: None,
    })
}

/// Weekly report covering the selected entries: ids in ascending order and
/// the period spanning their earliest and latest dates. `None` when nothing
/// visible is selected.
pub(crate) fn report_from_selection(entries: &[Entry], selected: &BTreeSet<u64>) -> Option<NewWeeklyReport> {
    let chosen: Vec<&Entry> = entries.iter().filter(|e| selected.contains(&e.id)).collect();
    let period_start = chosen.iter().map(|e| e.entry_date.as_str()).min()?;
    let period_end = chosen.iter().map(|e| e.entry_date.as_str()).max()?;
    let mut entry_ids: Vec<u64> = chosen.iter().map(|e| e.id).collect();
    entry_ids.sort_unstable();
    Some(NewWeeklyReport { entry_ids, period_start: period_start.to_owned(), period_end: period_end.to_owned() })
}

#[cfg(feature = "csr")]
pub use view::DailyEntriesPage;

#[cfg(feature = "csr")]
mod view {
    use std::collections::BTreeSet;

    use leptos::prelude::*;
    use leptos::task::spawn_local;
    use leptos_router::NavigateOptions;
    use leptos_router::hooks::use_navigate;

    use super::{entry_filters, new_entry, page_summary, report_from_selection};
    use crate::app::{AppHandle, use_auth};
    use crate::components::app_header::AppHeader;
    use crate::net::types::{Entry, Page};
    use crate::pages::error_text;
    use crate::routes::WEEKLY_REPORTS_PATH;

    #[component]
    pub fn DailyEntriesPage() -> impl IntoView {
        let app = expect_context::<AppHandle>();
        let auth = use_auth();
        let navigate = use_navigate();

        let status_filter = RwSignal::new(String::new());
        let page_number = RwSignal::new(1_u32);
        let reload = RwSignal::new(0_u32);
        let entries = RwSignal::new(None::<Page<Entry>>);
        let status_options = RwSignal::new(Vec::<String>::new());
        let selected = RwSignal::new(BTreeSet::<u64>::new());
        let error = RwSignal::new(None::<String>);
        let busy = RwSignal::new(false);

        let form_date = RwSignal::new(String::new());
        let form_ppa = RwSignal::new(String::new());
        let form_kpi = RwSignal::new(String::new());
        let form_status = RwSignal::new(String::new());
        let form_remarks = RwSignal::new(String::new());

        {
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.enums.status_options().await.and_then(|r| r.into_data()) {
                    Ok(options) => status_options.set(options),
                    Err(e) => log::warn!("status options unavailable: {e}"),
                }
            });
        }

        Effect::new(move || {
            let filters = entry_filters(&status_filter.get(), page_number.get());
            reload.track();
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.entries.list(&filters).await.and_then(|r| r.into_data()) {
                    Ok(page) => {
                        error.set(None);
                        entries.set(Some(page));
                    }
                    Err(e) => error.set(Some(error_text(&e))),
                }
            });
        });

        let refresh = move || reload.update(|n| *n += 1);

        let on_add = move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let Some(user) = auth.get_untracked().user else {
                return;
            };
            let draft = new_entry(
                &user,
                &form_date.get_untracked(),
                &form_ppa.get_untracked(),
                &form_kpi.get_untracked(),
                &form_status.get_untracked(),
                &form_remarks.get_untracked(),
            );
            let draft = match draft {
                Ok(draft) => draft,
                Err(message) => {
                    error.set(Some(message.to_owned()));
                    return;
                }
            };
            busy.set(true);
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.entries.create(&draft).await.and_then(|r| r.into_data()) {
                    Ok(entry) => {
                        log::info!("created entry {}", entry.id);
                        for field in [form_ppa, form_kpi, form_remarks] {
                            field.set(String::new());
                        }
                        refresh();
                    }
                    Err(e) => error.set(Some(error_text(&e))),
                }
                busy.set(false);
            });
        };

        let delete_one = move |id: u64| {
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.entries.delete(id).await {
                    Ok(_) => {
                        selected.update(|s| {
                            s.remove(&id);
                        });
                        refresh();
                    }
                    Err(e) => error.set(Some(error_text(&e))),
                }
            });
        };

        let on_delete_selected = move |_| {
            let ids: Vec<u64> = selected.get_untracked().into_iter().collect();
            if ids.is_empty() {
                return;
            }
            let ctx = app.get_value();
            spawn_local(async move {
                match ctx.entries.bulk_delete(&ids).await {
                    Ok(_) => {
                        selected.set(BTreeSet::new());
                        refresh();
                    }
                    Err(e) => error.set(Some(error_text(&e))),
                }
            });
        };

        let on_create_report = move |_| {
            let visible = entries.get_untracked().map(|p| p.data).unwrap_or_default();
            let Some(report) = report_from_selection(&visible, &selected.get_untracked()) else {
                error.set(Some("Select at least one entry.".to_owned()));
                return;
            };
            let ctx = app.get_value();
            let navigate = navigate.clone();
            spawn_local(async move {
                match ctx.weekly_reports.create(&report).await.and_then(|r| r.into_data()) {
                    Ok(created) => {
                        log::info!("created weekly report {}", created.id);
                        navigate(WEEKLY_REPORTS_PATH, NavigateOptions::default());
                    }
                    Err(e) => error.set(Some(error_text(&e))),
                }
            });
        };

        let has_prev = move || page_number.get() > 1;
        let has_next = move || entries.get().is_some_and(|p| p.has_next());

        view! {
            <div class="entries-page">
                <AppHeader/>
                <form class="entries-page__add" on:submit=on_add>
                    <input type="date" prop:value=move || form_date.get() on:input=move |ev| form_date.set(event_target_value(&ev))/>
                    <input placeholder="PPA" prop:value=move || form_ppa.get() on:input=move |ev| form_ppa.set(event_target_value(&ev))/>
                    <input placeholder="KPI" prop:value=move || form_kpi.get() on:input=move |ev| form_kpi.set(event_target_value(&ev))/>
                    <select on:change=move |ev| form_status.set(event_target_value(&ev))>
                        <option value="">"Status"</option>
                        {move || status_options.get().into_iter().map(|s| view! { <option value=s.clone()>{s}</option> }).collect_view()}
                    </select>
                    <input placeholder="Remarks" prop:value=move || form_remarks.get() on:input=move |ev| form_remarks.set(event_target_value(&ev))/>
                    <button class="btn" type="submit" disabled=move || busy.get()>"Add Entry"</button>
                </form>

                <div class="entries-page__toolbar">
                    <select on:change=move |ev| {
                        status_filter.set(event_target_value(&ev));
                        page_number.set(1);
                    }>
                        <option value="">"All statuses"</option>
                        {move || status_options.get().into_iter().map(|s| view! { <option value=s.clone()>{s}</option> }).collect_view()}
                    </select>
                    <button class="btn" on:click=on_delete_selected disabled=move || selected.get().is_empty()>
                        "Delete Selected"
                    </button>
                    <button class="btn" on:click=on_create_report disabled=move || selected.get().is_empty()>
                        "Create Weekly Report"
                    </button>
                </div>

                <Show when=move || error.get().is_some()>
                    <p class="entries-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <Show when=move || entries.get().is_some() fallback=|| view! { <p>"Loading entries..."</p> }>
                    <table class="entries-table">
                        <thead>
                            <tr>
                                <th></th>
                                <th>"Date"</th>
                                <th>"PPA"</th>
                                <th>"KPI"</th>
                                <th>"Status"</th>
                                <th>"Remarks"</th>
                                <th>"Report"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                entries
                                    .get()
                                    .map(|p| p.data)
                                    .unwrap_or_default()
                                    .into_iter()
                                    .map(|entry| {
                                        let id = entry.id;
                                        view! {
                                            <tr>
                                                <td>
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=move || selected.get().contains(&id)
                                                        on:change=move |_| selected.update(|s| {
                                                            if !s.remove(&id) {
                                                                s.insert(id);
                                                            }
                                                        })
                                                    />
                                                </td>
                                                <td>{entry.entry_date}</td>
                                                <td>{entry.ppa}</td>
                                                <td>{entry.kpi}</td>
                                                <td>{entry.status}</td>
                                                <td>{entry.remarks.unwrap_or_default()}</td>
                                                <td>{entry.weekly_report.map(|r| r.title).unwrap_or_default()}</td>
                                                <td>
                                                    <button class="btn btn--danger" on:click=move |_| delete_one(id)>"Delete"</button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                    <div class="entries-page__pager">
                        <button class="btn" disabled=move || !has_prev() on:click=move |_| page_number.update(|n| *n = n.saturating_sub(1).max(1))>
                            "Previous"
                        </button>
                        <span>{move || entries.get().map(|p| page_summary(&p)).unwrap_or_default()}</span>
                        <button class="btn" disabled=move || !has_next() on:click=move |_| page_number.update(|n| *n += 1)>
                            "Next"
                        </button>
                    </div>
                </Show>
            </div>
        }
    }
}
