use super::*;

fn user(employee_id: &str) -> User {
    User {
        id: 1,
        employee_id: employee_id.to_owned(),
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.test".to_owned(),
        department: "Ops".to_owned(),
        position: "Analyst".to_owned(),
        manager_id: None,
    }
}

#[test]
fn display_name_includes_employee_id() {
    assert_eq!(display_name(Some(&user("EMP-001"))), "Ada Lovelace (EMP-001)");
}

#[test]
fn display_name_without_employee_id_is_just_the_name() {
    assert_eq!(display_name(Some(&user(""))), "Ada Lovelace");
}

#[test]
fn display_name_without_user() {
    assert_eq!(display_name(None), "Signed out");
}
