use contracts::domain::a003_department::Department;
use leptos::prelude::*;

use crate::shared::icons::icon;

fn capacity_text(dept: &Department) -> String {
    match dept.max_members {
        Some(max) if max > 0 => format!("{} / {} members", dept.member_count, max),
        _ => format!("{} members", dept.member_count),
    }
}

fn capacity_class(dept: &Department) -> &'static str {
    match dept.fill_percent() {
        _ if dept.is_full() => "capacity__fill capacity__fill--full",
        Some(p) if p >= 80.0 => "capacity__fill capacity__fill--high",
        _ => "capacity__fill",
    }
}

#[component]
fn ManageButtons(
    department: Department,
    can_manage: Signal<bool>,
    on_edit: Callback<Department>,
    on_delete: Callback<Department>,
) -> impl IntoView {
    let for_edit = department.clone();
    let for_delete = department;
    view! {
        <Show when=move || can_manage.get()>
            <div class="department-card__actions">
                <button
                    class="button button--icon"
                    title="Edit"
                    on:click={
                        let d = for_edit.clone();
                        move |_| on_edit.run(d.clone())
                    }
                >
                    {icon("edit")}
                </button>
                <button
                    class="button button--icon button--danger"
                    title="Delete"
                    on:click={
                        let d = for_delete.clone();
                        move |_| on_delete.run(d.clone())
                    }
                >
                    {icon("trash")}
                </button>
            </div>
        </Show>
    }
}

/// One top-level department with its sub-departments listed inline.
#[component]
pub fn DepartmentCard(
    department: Department,
    #[prop(into)] can_manage: Signal<bool>,
    on_edit: Callback<Department>,
    on_delete: Callback<Department>,
) -> impl IntoView {
    let fill = department.fill_percent();
    let bar_class = capacity_class(&department);
    let card_class = if department.is_active {
        "department-card"
    } else {
        "department-card department-card--inactive"
    };
    let leader = department
        .leader
        .as_ref()
        .map(|l| l.full_name())
        .filter(|n| !n.is_empty());
    let subs = department.sub_departments.clone();

    view! {
        <div class=card_class>
            <div class="department-card__header">
                <div>
                    <h3 class="department-card__name">{department.name.clone()}</h3>
                    <span class="badge badge--neutral">{department.department_type.label()}</span>
                    {(!department.is_active).then(|| view! {
                        <span class="badge badge--warning">"Inactive"</span>
                    })}
                    {department.is_full().then(|| view! {
                        <span class="badge badge--error">"Full"</span>
                    })}
                </div>
                <ManageButtons
                    department=department.clone()
                    can_manage=can_manage
                    on_edit=on_edit
                    on_delete=on_delete
                />
            </div>

            {department.description.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
                <p class="department-card__description">{d}</p>
            })}

            <div class="department-card__meta">
                <span>{icon("user")} " " {leader.unwrap_or_else(|| "No leader assigned".to_string())}</span>
                {department.meeting_schedule.clone().map(|s| view! { <span>{icon("activity")} " " {s}</span> })}
                {department.contact_email.clone().map(|e| view! { <span>{icon("mail")} " " {e}</span> })}
            </div>

            <div class="capacity">
                <span class="capacity__label">{capacity_text(&department)}</span>
                {fill.map(|p| view! {
                    <div class="capacity__bar">
                        <div class=bar_class style=format!("width: {:.0}%;", p)></div>
                    </div>
                })}
            </div>

            {(!subs.is_empty()).then(|| view! {
                <div class="department-card__subs">
                    <div class="department-card__subs-title">
                        {format!("Sub-departments ({})", subs.len())}
                    </div>
                    {subs.into_iter().map(|sub| view! {
                        <div class="department-sub">
                            {icon("chevron-right")}
                            <span class="department-sub__name">{sub.name.clone()}</span>
                            <span class="department-sub__count">{capacity_text(&sub)}</span>
                            <ManageButtons
                                department=sub.clone()
                                can_manage=can_manage
                                on_edit=on_edit
                                on_delete=on_delete
                            />
                        </div>
                    }).collect_view()}
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(count: u32, max: Option<u32>) -> Department {
        serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Choir", "member_count": count, "max_members": max,
        }))
        .unwrap()
    }

    #[test]
    fn capacity_text_shows_limit_when_set() {
        assert_eq!(capacity_text(&dept(8, Some(20))), "8 / 20 members");
        assert_eq!(capacity_text(&dept(8, None)), "8 members");
    }

    #[test]
    fn capacity_bar_flags_full_and_nearly_full() {
        assert_eq!(capacity_class(&dept(20, Some(20))), "capacity__fill capacity__fill--full");
        assert_eq!(capacity_class(&dept(17, Some(20))), "capacity__fill capacity__fill--high");
        assert_eq!(capacity_class(&dept(3, Some(20))), "capacity__fill");
    }
}
