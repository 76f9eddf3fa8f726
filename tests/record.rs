use randpop::domain::record;
use serde_json::json;

#[test]
fn identity_key_concatenates_name_and_value() {
    let doc = json!({"id": {"name": "PPS", "value": "0390511T"}});
    assert_eq!(record::identity_key(&doc), "PPS0390511T");
    assert!(record::has_external_id(&doc));
}

#[test]
fn identity_key_is_empty_without_external_id() {
    let doc = json!({"id": {"name": null, "value": null}});
    assert_eq!(record::identity_key(&doc), "");
    assert!(!record::has_external_id(&doc));

    let doc = json!({"name": {"first": "brad"}});
    assert_eq!(record::identity_key(&doc), "");
}

#[test]
fn identity_key_keeps_partial_ids() {
    let doc = json!({"id": {"name": "SSN", "value": null}});
    assert_eq!(record::identity_key(&doc), "SSN");
    assert!(record::has_external_id(&doc));
}

#[test]
fn numeric_id_value_is_stringified() {
    let doc = json!({"id": {"name": "INSEE", "value": 295042}});
    assert_eq!(record::identity_key(&doc), "INSEE295042");
}

#[test]
fn username_comes_from_login() {
    let doc = json!({"login": {"username": "silverswan131", "uuid": "x"}});
    assert_eq!(record::username(&doc).as_deref(), Some("silverswan131"));
    assert_eq!(record::username(&json!({})), None);
}

#[test]
fn dob_with_millisecond_fraction_is_well_formed() {
    let doc = json!({"dob": {"date": "1993-07-20T09:44:18.674Z", "age": 26}});
    assert!(record::dob_is_well_formed(&doc));
}

#[test]
fn garbage_dob_is_flagged() {
    let doc = json!({"dob": {"date": "20/07/1993", "age": 26}});
    assert!(!record::dob_is_well_formed(&doc));
}

#[test]
fn absent_dob_is_not_flagged() {
    assert!(record::dob_is_well_formed(&json!({})));
}
