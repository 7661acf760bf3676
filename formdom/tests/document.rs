use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use formdom::{find_element, Content, Display, Document, DomError, Element};

fn form_fixture() -> Document {
    let doc = Document::new();
    doc.mount(
        doc.root(),
        Element::form()
            .id("signup")
            .child(Element::input().id("email"))
            .child(Element::input().id("password")),
    )
    .unwrap();
    doc
}

// ============================================================================
// Building
// ============================================================================

#[test]
fn test_mount_builds_children_in_order() {
    let doc = form_fixture();
    let form = doc.get_by_id("signup").unwrap();
    let email = doc.get_by_id("email").unwrap();
    let password = doc.get_by_id("password").unwrap();

    assert_eq!(doc.children(form), vec![email, password]);
    assert_eq!(doc.parent(email), Some(form));
    assert_eq!(doc.parent(form), Some(doc.root()));
    assert_eq!(doc.tag(email).as_deref(), Some("input"));
}

#[test]
fn test_find_element_in_builder_tree() {
    let tree = Element::div()
        .id("outer")
        .child(Element::div().id("inner").child(Element::label("hi").id("leaf")));

    let leaf = find_element(&tree, "leaf").unwrap();
    assert_eq!(leaf.content, Content::Text("hi".to_string()));
    assert!(find_element(&tree, "missing").is_none());
}

#[test]
fn test_create_element_is_detached() {
    let doc = Document::new();
    let label = doc.create_element("label");

    assert_eq!(doc.parent(label), None);
    assert!(!doc.contains(label));
}

#[test]
fn test_mount_rejects_duplicate_ids() {
    let doc = form_fixture();

    assert_eq!(
        doc.mount(doc.root(), Element::input().id("email")),
        Err(DomError::DuplicateId("email".to_string()))
    );
    assert_eq!(
        doc.mount(
            doc.root(),
            Element::div().id("a").child(Element::div().id("a"))
        ),
        Err(DomError::DuplicateId("a".to_string()))
    );
    assert!(doc.get_by_id("a").is_none());
}

#[test]
fn test_element_id_and_data_attributes() {
    let doc = Document::new();
    let input = doc
        .mount(doc.root(), Element::input().id("age").data("field", "age"))
        .unwrap();

    assert_eq!(doc.element_id(input).as_deref(), Some("age"));
    assert_eq!(doc.data(input, "field").as_deref(), Some("age"));

    doc.set_data(input, "bound", "validate").unwrap();
    assert_eq!(
        doc.outer_html(input).unwrap(),
        "<input id=\"age\" data-bound=\"validate\" data-field=\"age\">"
    );

    let label = doc.create_element("label");
    assert!(doc.element_id(label).unwrap().starts_with("label-"));
}

// ============================================================================
// Sibling insertion
// ============================================================================

#[test]
fn test_insert_after_places_node_as_next_sibling() {
    let doc = form_fixture();
    let email = doc.get_by_id("email").unwrap();
    let password = doc.get_by_id("password").unwrap();
    let label = doc.create_element("label");

    doc.insert_after(email, label).unwrap();

    assert_eq!(doc.next_sibling(email), Some(label));
    assert_eq!(doc.next_sibling(label), Some(password));
    assert!(doc.contains(label));
}

#[test]
fn test_insert_after_last_child_appends() {
    let doc = form_fixture();
    let password = doc.get_by_id("password").unwrap();
    let label = doc.create_element("label");

    doc.insert_after(password, label).unwrap();

    assert_eq!(doc.next_sibling(password), Some(label));
    assert_eq!(doc.next_sibling(label), None);
}

#[test]
fn test_insert_after_detached_reference_fails() {
    let doc = Document::new();
    let orphan = doc.create_element("input");
    let label = doc.create_element("label");

    assert_eq!(
        doc.insert_after(orphan, label),
        Err(DomError::Detached(orphan))
    );
}

#[test]
fn test_append_child_rejects_cycles() {
    let doc = form_fixture();
    let form = doc.get_by_id("signup").unwrap();
    let email = doc.get_by_id("email").unwrap();

    assert!(matches!(
        doc.append_child(email, form),
        Err(DomError::Hierarchy(_))
    ));
}

// ============================================================================
// Visibility and content
// ============================================================================

#[test]
fn test_visibility_follows_ancestors() {
    let doc = form_fixture();
    let form = doc.get_by_id("signup").unwrap();
    let email = doc.get_by_id("email").unwrap();

    assert!(doc.is_visible(email));
    doc.set_display(form, Display::None).unwrap();
    assert!(!doc.is_visible(email));
    assert_eq!(doc.display(email), Some(Display::Block));
}

#[test]
fn test_text_is_escaped_but_html_is_not() {
    let doc = Document::new();
    let a = doc.mount(doc.root(), Element::new("p").id("a")).unwrap();
    let b = doc.mount(doc.root(), Element::new("p").id("b")).unwrap();

    doc.set_text(a, "<b>bold</b>").unwrap();
    doc.set_html(b, "<b>bold</b>").unwrap();

    assert_eq!(
        doc.outer_html(a).unwrap(),
        "<p id=\"a\">&lt;b&gt;bold&lt;/b&gt;</p>"
    );
    assert_eq!(doc.outer_html(b).unwrap(), "<p id=\"b\"><b>bold</b></p>");
    assert_eq!(doc.text(a).as_deref(), Some("<b>bold</b>"));
}

#[test]
fn test_serialization_of_hidden_label() {
    let doc = Document::new();
    doc.mount(
        doc.root(),
        Element::new("label").id("err").class("error").hidden(),
    )
    .unwrap();

    assert_eq!(
        doc.to_html(),
        "<body id=\"body\"><label id=\"err\" class=\"error\" style=\"display: none\"></label></body>"
    );
}

#[test]
fn test_void_elements_have_no_closing_tag() {
    let doc = Document::new();
    let input = doc.mount(doc.root(), Element::input().id("x")).unwrap();
    assert_eq!(doc.outer_html(input).unwrap(), "<input id=\"x\">");
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_runs_dispose_callbacks_for_subtree() {
    let doc = form_fixture();
    let form = doc.get_by_id("signup").unwrap();
    let email = doc.get_by_id("email").unwrap();
    let count = Arc::new(AtomicUsize::new(0));

    for node in [form, email] {
        let count = Arc::clone(&count);
        doc.on_dispose(node, move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    doc.remove(form).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert!(!doc.contains(email));
    assert!(doc.get_by_id("email").is_none());
    assert_eq!(doc.set_text(email, "x"), Err(DomError::Removed(email)));
}

#[test]
fn test_removed_id_can_be_mounted_again() {
    let doc = form_fixture();
    let email = doc.get_by_id("email").unwrap();
    doc.remove(email).unwrap();

    let again = doc.mount(doc.root(), Element::input().id("email")).unwrap();

    assert_ne!(again, email);
    assert_eq!(doc.get_by_id("email"), Some(again));
    assert_eq!(doc.element_id(email), None);
    assert_eq!(doc.outer_html(email), Err(DomError::Removed(email)));
}

#[test]
fn test_dispose_callback_may_touch_document() {
    let doc = form_fixture();
    let email = doc.get_by_id("email").unwrap();
    let password = doc.get_by_id("password").unwrap();

    let handle = doc.clone();
    doc.on_dispose(email, move || {
        handle.set_display(password, Display::None).unwrap();
    })
    .unwrap();

    doc.remove(email).unwrap();
    assert_eq!(doc.display(password), Some(Display::None));
}

#[test]
fn test_root_cannot_be_removed() {
    let doc = Document::new();
    assert!(matches!(doc.remove(doc.root()), Err(DomError::Hierarchy(_))));
}
