//! End-to-end synchronization scenarios between an element's attribute text
//! and its bound lists.

use vgdom_list::{
    AnyItem, COMMA_SEPARATOR, DynList, Element, ListErrorKind, NumberItem, StringItem,
};

fn table(text: &str) -> Element {
    let element = Element::new("feFuncR");
    element.set_attribute("tableValues", text);
    element
}

fn text(element: &Element) -> String {
    element.get_attribute("tableValues").unwrap_or_default()
}

#[test]
fn dom_walkthrough() {
    let element = table("1 2 3");
    let list = element.number_list("tableValues").unwrap();

    assert_eq!(list.get_item(1).unwrap().value(), 2.0);

    let removed = list.remove_item(0).unwrap();
    assert_eq!(removed.value(), 1.0);
    assert_eq!(text(&element), "2 3");

    list.append_item(NumberItem::new(4.0)).unwrap();
    assert_eq!(text(&element), "2 3 4");

    list.insert_item_before(NumberItem::new(0.0), 0).unwrap();
    assert_eq!(text(&element), "0 2 3 4");

    let err = list.get_item(10).unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::IndexSize);
    assert_eq!(err.arg("len"), Some("4"));

    list.initialize(NumberItem::new(9.0)).unwrap();
    assert_eq!(text(&element), "9");
    assert_eq!(list.number_of_items().unwrap(), 1);

    // Mutations never reparse.
    assert_eq!(list.reparse_count(), 1);
}

#[test]
fn invalidation_is_lazy() {
    let element = table("1 2");
    let list = element.number_list("tableValues").unwrap();
    assert_eq!(list.reparse_count(), 0);

    for i in 0..5 {
        element.set_attribute("tableValues", format!("{i}"));
        list.invalidate();
    }
    assert_eq!(list.reparse_count(), 0);

    assert_eq!(list.values().unwrap(), vec![4.0]);
    assert_eq!(list.values().unwrap(), vec![4.0]);
    assert_eq!(list.reparse_count(), 1);
}

#[test]
fn parse_failure_then_fix() {
    let element = table("1 2 x");
    let list = element.number_list("tableValues").unwrap();

    let err = list.len().unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::Parse);
    assert_eq!(err.parse_error().map(|e| e.position), Some(4));
    assert!(!list.is_valid());

    // Mutators that need the sequence fail the same way.
    assert!(list.append_item(NumberItem::new(1.0)).is_err());
    assert_eq!(text(&element), "1 2 x");

    element.set_attribute("tableValues", "1 2 3");
    assert_eq!(list.len().unwrap(), 3);
    assert!(list.is_valid());
    assert_eq!(list.reparse_count(), 3);

    // A rejected value is reported apart from a parse failure and keeps the
    // list valid.
    let err = list.append_item(NumberItem::new(f32::NAN)).unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::InvalidValue);
    assert!(list.is_valid());
    assert_eq!(text(&element), "1 2 3");
}

#[test]
fn move_between_lists_detaches_first() {
    let element = Element::new("feComponentTransfer");
    element.set_attribute("a", "1 2");
    element.set_attribute("b", "3");
    let a = element.number_list("a").unwrap();
    let b = element.number_list("b").unwrap();

    let item = a.get_item(0).unwrap();
    b.insert_item_before(item.clone(), 100).unwrap();

    assert!(item.is_owned_by(&b));
    assert!(!item.is_owned_by(&a));
    assert_eq!(element.get_attribute("a").as_deref(), Some("2"));
    assert_eq!(element.get_attribute("b").as_deref(), Some("3 1"));

    item.set_value(7.0).unwrap();
    assert_eq!(element.get_attribute("a").as_deref(), Some("2"));
    assert_eq!(element.get_attribute("b").as_deref(), Some("3 7"));
}

#[test]
fn moving_out_of_a_read_only_list_is_rejected() {
    let element = table("1 2");
    let anim = element.animated_number_list("tableValues").unwrap();
    let other = Element::new("feFuncG");
    other.set_attribute("tableValues", "");
    let target = other.number_list("tableValues").unwrap();

    let item = anim.get_item(0).unwrap();
    let err = target.append_item(item.clone()).unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::NoModificationAllowed);
    assert!(item.is_owned_by(&anim));
    assert_eq!(target.len().unwrap(), 0);
}

#[test]
fn index_errors_leave_text_alone() {
    let element = table("1 2");
    let list = element.number_list("tableValues").unwrap();

    assert!(list.replace_item(NumberItem::new(5.0), 2).is_err());
    assert!(list.remove_item(7).is_err());
    assert_eq!(text(&element), "1 2");
    assert_eq!(list.len().unwrap(), 2);
}

#[test]
fn language_list_uses_comma_separator() {
    let element = Element::new("switch");
    element.set_attribute("systemLanguage", "en, fr ,de");
    let list = element
        .string_list_with_separator("systemLanguage", COMMA_SEPARATOR)
        .unwrap();

    assert_eq!(list.values().unwrap(), vec!["en", "fr", "de"]);
    list.remove_item(1).unwrap();
    assert_eq!(
        element.get_attribute("systemLanguage").as_deref(),
        Some("en, de")
    );

    let err = list
        .append_item(StringItem::from_token("pt BR"))
        .unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::InvalidValue);
}

#[test]
fn dynamic_access_checks_kind() {
    let element = Element::new("g");
    element.set_attribute("requiredFeatures", "a b");
    element.string_list("requiredFeatures").unwrap();
    let list: Box<dyn DynList> = element.dyn_list("requiredFeatures").unwrap();

    let err = list
        .insert_item_before(AnyItem::from(NumberItem::new(1.0)), 0)
        .unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::WrongType);
    assert_eq!(err.to_string(), "expected a string item, found a number item");

    list.replace_item(StringItem::from_token("c").into(), 0)
        .unwrap();
    assert_eq!(
        element.get_attribute("requiredFeatures").as_deref(),
        Some("c b")
    );
}

#[test]
fn error_messages_localize() {
    let element = table("1");
    let list = element.number_list("tableValues").unwrap();
    let err = list.get_item(3).unwrap_err();
    let catalog = vgdom_i18n::bundled_catalog();
    assert_eq!(
        err.localized(catalog, "en"),
        "index 3 is out of bounds for a list of length 1"
    );
    assert_ne!(err.localized(catalog, "fr"), err.localized(catalog, "en"));
}
