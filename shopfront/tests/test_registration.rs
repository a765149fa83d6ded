mod common;

use chrono::{FixedOffset, Months, TimeZone, Utc};
use common::{init_test_logging, use_device_zone_ict, MemoryStore, ICT_OFFSET_MINUTES};
use shopfront::primitives::CalendarDate;
use shopfront::registration::{
    validator::validate_registration, RegistrationError, RegistrationFlow, RegistrationForm,
    RequiredField, ValidationError, USERS_KEY,
};
use shopfront::NavigationTarget;

fn today() -> CalendarDate {
    CalendarDate::from_ymd(2025, 3, 1).unwrap()
}

fn years_ago(years: u32) -> CalendarDate {
    CalendarDate::new(
        today()
            .as_naive()
            .checked_sub_months(Months::new(12 * years))
            .unwrap(),
    )
}

fn accepted_form() -> RegistrationForm {
    RegistrationForm {
        name: "A".to_string(),
        email: "a@gmail.com".to_string(),
        password: "12345678".to_string(),
        confirm_password: "12345678".to_string(),
        gender: "Nam".to_string(),
        birth_date: years_ago(19),
    }
}

#[test]
fn test_accepted_form_appends_exactly_one_record() {
    init_test_logging();
    let store = MemoryStore::new();
    let flow = RegistrationFlow::new(store.clone());

    let outcome = flow.register_on(accepted_form(), today()).unwrap();

    assert_eq!(outcome.registered_count, 1);
    assert_eq!(outcome.next, NavigationTarget::Login);
    assert_eq!(store.writes(), [USERS_KEY]);

    let users = flow.registered_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "A");
    assert_eq!(users[0].birth_date, years_ago(19));
}

#[test]
fn test_rejected_forms_leave_the_list_unchanged() {
    init_test_logging();
    let store = MemoryStore::new();
    let flow = RegistrationFlow::new(store.clone());
    flow.register_on(accepted_form(), today()).unwrap();
    let before = store.value(USERS_KEY);

    let rejected = [
        (
            RegistrationForm {
                email: "b@yahoo.com".to_string(),
                ..accepted_form()
            },
            "Only Gmail accounts are allowed.",
        ),
        (
            RegistrationForm {
                email: "b@gmail.com".to_string(),
                name: String::new(),
                ..accepted_form()
            },
            "All fields are required.",
        ),
        (
            RegistrationForm {
                email: "b@gmail.com".to_string(),
                password: "abc".to_string(),
                confirm_password: "abc".to_string(),
                ..accepted_form()
            },
            "Password must be at least 8 characters.",
        ),
        (
            RegistrationForm {
                email: "b@gmail.com".to_string(),
                confirm_password: "87654321".to_string(),
                ..accepted_form()
            },
            "Passwords do not match.",
        ),
        (
            RegistrationForm {
                email: "b@gmail.com".to_string(),
                birth_date: years_ago(17),
                ..accepted_form()
            },
            "You must be at least 18 years old to register.",
        ),
        (accepted_form(), "Email is already registered."),
    ];

    for (form, notice) in rejected {
        let err = flow.register_on(form, today()).unwrap_err();
        assert!(matches!(err, RegistrationError::Validation(_)));
        assert_eq!(err.to_string(), notice);
    }

    assert_eq!(store.value(USERS_KEY), before);
    assert_eq!(flow.registered_users().unwrap().len(), 1);
}

#[test]
fn test_birthday_boundary() {
    let flow = RegistrationFlow::new(MemoryStore::new());

    let turning_eighteen_today = RegistrationForm {
        birth_date: years_ago(18),
        ..accepted_form()
    };
    assert!(flow.register_on(turning_eighteen_today, today()).is_ok());

    let turning_eighteen_tomorrow = RegistrationForm {
        email: "b@gmail.com".to_string(),
        birth_date: CalendarDate::new(years_ago(18).as_naive().succ_opt().unwrap()),
        ..accepted_form()
    };
    assert!(matches!(
        flow.register_on(turning_eighteen_tomorrow, today()),
        Err(RegistrationError::Validation(ValidationError::Underage))
    ));
}

#[test]
fn test_accounts_from_older_app_versions_block_reuse() {
    let store = MemoryStore::new();
    store.seed(
        USERS_KEY,
        r#"[{"name":"Old","email":"a@gmail.com","password":"oldpass1","gender":"Nữ","birthDate":"1990-04-05T17:00:00.000Z"}]"#,
    );
    let flow = RegistrationFlow::new(store);

    assert!(matches!(
        flow.register_on(accepted_form(), today()),
        Err(RegistrationError::Validation(ValidationError::DuplicateEmail))
    ));
}

#[test]
fn test_older_accounts_keep_their_local_birth_dates() {
    use_device_zone_ict();
    let store = MemoryStore::new();
    store.seed(
        USERS_KEY,
        r#"[{"name":"Old","email":"old@gmail.com","password":"oldpass1","gender":"Nữ","birthDate":"1990-04-05T17:00:00.000Z"}]"#,
    );
    let flow = RegistrationFlow::new(store.clone());

    flow.register_on(accepted_form(), today()).unwrap();

    let users = flow.registered_users().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].birth_date, CalendarDate::from_ymd(1990, 4, 6).unwrap());
    assert!(store
        .value(USERS_KEY)
        .unwrap()
        .contains(r#""birthDate":"1990-04-06T00:00:00+00:00""#));
}

#[test]
fn test_eighteenth_birthday_starts_at_local_midnight() {
    let ict = FixedOffset::east_opt(ICT_OFFSET_MINUTES * 60).unwrap();
    // 01:30 on 1 March 2025 in UTC+7; still 28 February in UTC.
    let instant = Utc.with_ymd_and_hms(2025, 2, 28, 18, 30, 0).unwrap();
    let form = RegistrationForm {
        birth_date: CalendarDate::from_ymd(2007, 3, 1).unwrap(),
        ..accepted_form()
    };

    assert_eq!(
        validate_registration(form.clone(), CalendarDate::at(instant, ict), Vec::new()),
        Ok(())
    );
    let utc = FixedOffset::east_opt(0).unwrap();
    assert_eq!(
        validate_registration(form, CalendarDate::at(instant, utc), Vec::new()),
        Err(ValidationError::Underage)
    );
}

#[test]
fn test_corrupted_list_reports_generic_failure() {
    let store = MemoryStore::new();
    store.seed(USERS_KEY, "not json");
    let flow = RegistrationFlow::new(store.clone());

    let err = flow.register_on(accepted_form(), today()).unwrap_err();

    assert_eq!(err.to_string(), "Something went wrong.");
    assert_eq!(store.value(USERS_KEY).as_deref(), Some("not json"));
}

#[test]
fn test_standalone_validation_reports_first_missing_field() {
    let form = RegistrationForm {
        password: String::new(),
        gender: String::new(),
        ..accepted_form()
    };

    assert_eq!(
        validate_registration(form, today(), Vec::new()),
        Err(ValidationError::MissingField {
            field: RequiredField::Password
        })
    );
}
