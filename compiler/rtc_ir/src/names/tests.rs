use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn small_table() -> NameTable {
    NameTable::new(&TableConfig::small())
}

#[test]
fn intern_same_text_same_id() {
    let mut names = NameTable::default();
    let foo = names.intern_utf8("foo");
    let bar = names.intern_utf8("bar");
    assert_eq!(foo, names.intern_utf8("foo"));
    assert_ne!(foo, bar);
    assert_eq!(names.resolve(foo), NameRef::Utf8("foo"));
    assert_eq!(names.text(bar), Some("bar"));
}

#[test]
fn reinterning_never_grows() {
    let mut names = NameTable::default();
    names.intern_utf8("once");
    let len = names.len();
    for _ in 0..100 {
        names.intern_utf8("once");
    }
    assert_eq!(names.len(), len);
}

#[test]
fn well_known_names_have_fixed_ids() {
    let names = NameTable::default();
    assert_eq!(names.text(NameId::INITIALIZE), Some("initialize"));
    assert_eq!(names.text(NameId::AND_AND), Some("&&"));
    assert_eq!(names.text(NameId::SQUARE_BRACKETS_EQ), Some("[]="));
    assert_eq!(names.text(NameId::MERGE), Some("merge"));
    assert_eq!(names.lookup_utf8("to_s"), Some(NameId::TO_S));
    // reserved slot + 16 well-known names
    assert_eq!(names.len(), 17);
}

#[test]
fn empty_text_is_not_the_reserved_id() {
    let mut names = NameTable::default();
    let empty = names.intern_utf8("");
    assert!(empty.exists());
    assert_eq!(names.text(empty), Some(""));
}

#[test]
fn lookup_does_not_intern() {
    let mut names = NameTable::default();
    let len = names.len();
    assert_eq!(names.lookup_utf8("absent"), None);
    assert_eq!(names.len(), len);
    let id = names.intern_utf8("absent");
    assert_eq!(names.lookup_utf8("absent"), Some(id));
}

#[test]
fn unique_names_are_always_fresh() {
    let mut names = NameTable::default();
    let a = names.intern_unique(UniqueNameKind::Desugar, NameId::AND_AND);
    let b = names.intern_unique(UniqueNameKind::Desugar, NameId::AND_AND);
    assert_ne!(a, b);
    assert!(matches!(
        names.resolve(a),
        NameRef::Unique {
            kind: UniqueNameKind::Desugar,
            original: NameId::AND_AND,
            ..
        }
    ));
    assert_eq!(names.text(a), None);
}

#[test]
fn unique_names_do_not_alias_text() {
    let mut names = NameTable::default();
    let unique = names.intern_unique(UniqueNameKind::Namer, NameId::OR_OR);
    let shown = names.show(unique);
    assert!(shown.starts_with("||$"), "got {shown}");
    // Interning the rendered form yields a plain text name, not the unique one.
    assert_ne!(names.intern_utf8(&shown), unique);
}

#[test]
fn growth_keeps_every_name_reachable() {
    let mut names = small_table();
    let initial_buckets = names.bucket_count();
    let ids: Vec<(String, NameId)> = (0..2000)
        .map(|i| {
            let text = format!("name_{i}");
            let id = names.intern_utf8(&text);
            (text, id)
        })
        .collect();

    assert!(names.bucket_count() > initial_buckets);
    assert!(names.bucket_count().is_power_of_two());
    for (text, id) in &ids {
        assert_eq!(names.lookup_utf8(text), Some(*id));
        assert_eq!(names.text(*id), Some(text.as_str()));
    }
}

#[test]
fn growth_interleaved_with_unique_names() {
    let mut names = small_table();
    let mut uniques = Vec::new();
    for i in 0..500 {
        let base = names.intern_utf8(&format!("v{i}"));
        uniques.push(names.intern_unique(UniqueNameKind::Desugar, base));
    }
    let mut sorted = uniques.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), uniques.len());
    assert_eq!(names.lookup_utf8("v0").map(|id| names.show(id)), Some("v0".to_owned()));
}

#[test]
fn arena_pages_are_added_not_reallocated() {
    let mut names = small_table();
    let first = names.intern_utf8("first-name-on-page-one");
    let pages_before = names.page_count();
    for i in 0..200 {
        names.intern_utf8(&format!("filler-{i:04}-xxxxxxxxxxxxxxxx"));
    }
    assert!(names.page_count() > pages_before);
    assert_eq!(names.text(first), Some("first-name-on-page-one"));
}

#[test]
fn name_longer_than_page_is_rejected() {
    let mut names = small_table();
    let long = "x".repeat(257);
    assert_eq!(
        names.try_intern_utf8(&long),
        Err(NameTableError::NameTooLong {
            len: 257,
            page_size: 256
        })
    );
}

#[test]
fn name_exactly_one_page_fits() {
    let mut names = small_table();
    let full = "y".repeat(256);
    let id = names.intern_utf8(&full);
    assert_eq!(names.text(id), Some(full.as_str()));
}

#[test]
fn add_eq_builds_setter_name() {
    let mut names = NameTable::default();
    let attr = names.intern_utf8("attr");
    let setter = names.add_eq(attr);
    assert_eq!(names.text(setter), Some("attr="));
    assert_eq!(names.add_eq(attr), setter);
}

#[test]
fn add_eq_rejects_unique_names() {
    let mut names = NameTable::default();
    let unique = names.intern_unique(UniqueNameKind::Desugar, NameId::CALL);
    assert_eq!(names.try_add_eq(unique), Err(NameTableError::NotUtf8(unique)));
}

proptest! {
    #[test]
    fn intern_equal_iff_text_equal(a in ".{0,12}", b in ".{0,12}") {
        let mut names = small_table();
        let ia = names.intern_utf8(&a);
        let ib = names.intern_utf8(&b);
        prop_assert_eq!(ia == ib, a == b);
    }

    #[test]
    fn ids_stable_across_growth(texts in prop::collection::vec("[a-z]{1,8}", 1..300)) {
        let mut names = small_table();
        let first: Vec<NameId> = texts.iter().map(|t| names.intern_utf8(t)).collect();
        let len = names.len();
        let second: Vec<NameId> = texts.iter().map(|t| names.intern_utf8(t)).collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(names.len(), len);
    }
}
