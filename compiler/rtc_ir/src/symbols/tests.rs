use super::*;
use pretty_assertions::assert_eq;

fn tables(config: &TableConfig) -> (NameTable, SymbolTable) {
    let mut names = NameTable::new(config);
    let symbols = SymbolTable::new(config, &mut names);
    (names, symbols)
}

#[test]
fn bootstrap_symbols_in_fixed_order() {
    let (names, symbols) = tables(&TableConfig::default());
    assert_eq!(symbols.len(), 10);
    let shown: Vec<String> = (0..10)
        .map(|i| names.show(symbols.info(SymbolId::from_raw(i)).name))
        .collect();
    assert_eq!(
        shown,
        [
            "<none>",
            "<top>",
            "<bottom>",
            "<root>",
            "nil",
            "<todo sym>",
            "<todo lvar sym>",
            "<todo ivar sym>",
            "<todo gvar sym>",
            "<todo cvar sym>",
        ]
    );
    for i in 0..10 {
        let info = symbols.info(SymbolId::from_raw(i));
        assert!(info.is_class());
        assert!(info.is_completed());
        assert_eq!(info.owner, SymbolId::ROOT);
    }
}

#[test]
fn top_level_class_is_idempotent() {
    let (mut names, mut symbols) = tables(&TableConfig::default());
    let foo = names.intern_utf8("Foo");
    let a = symbols.declare_top_level_class(foo);
    let len = symbols.len();
    let b = symbols.declare_top_level_class(foo);
    assert_eq!(a, b);
    assert_eq!(symbols.len(), len);
    assert_eq!(symbols.top_level_class(foo), Some(a));
    assert!(!symbols.info(a).is_completed());
}

#[test]
fn bootstrap_names_resolve_to_bootstrap_classes() {
    let (mut names, mut symbols) = tables(&TableConfig::default());
    let nil = names.intern_utf8("nil");
    assert_eq!(symbols.declare_top_level_class(nil), SymbolId::NIL);
}

#[test]
fn declare_member_reuses_identical_signature() {
    let (mut names, mut symbols) = tables(&TableConfig::default());
    let class = symbols.synthesize_class(&mut names, "Widget");
    let meth = names.intern_utf8("frob");
    let a = symbols.declare_member(class, meth, SymbolId::NIL, vec![SymbolId::TOP], true);
    let b = symbols.declare_member(class, meth, SymbolId::NIL, vec![SymbolId::TOP], true);
    assert_eq!(a, b);
    assert_eq!(symbols.members(class).len(), 1);
}

#[test]
fn declare_member_splits_on_different_signature() {
    let (mut names, mut symbols) = tables(&TableConfig::default());
    let class = symbols.synthesize_class(&mut names, "Widget");
    let meth = names.intern_utf8("frob");
    let a = symbols.declare_member(class, meth, SymbolId::NIL, vec![SymbolId::TOP], true);
    let other_args = symbols.declare_member(class, meth, SymbolId::NIL, vec![], true);
    let other_result = symbols.declare_member(class, meth, SymbolId::TOP, vec![SymbolId::TOP], true);
    assert_ne!(a, other_args);
    assert_ne!(a, other_result);
    assert_ne!(other_args, other_result);
    assert_eq!(
        symbols.members(class),
        &[(meth, a), (meth, other_args), (meth, other_result)]
    );
    assert_eq!(symbols.lookup_member(class, meth), Some(a));
}

#[test]
fn member_kinds_follow_is_method() {
    let (mut names, mut symbols) = tables(&TableConfig::default());
    let class = symbols.synthesize_class(&mut names, "Widget");
    let m = names.intern_utf8("m");
    let f = names.intern_utf8("@f");
    let method = symbols.declare_member(class, m, SymbolId::NONE, vec![], true);
    let field = symbols.declare_member(class, f, SymbolId::NONE, vec![], false);
    assert!(symbols.info(method).is_method());
    assert!(symbols.info(field).is_field());
    assert_eq!(symbols.info(field).owner, class);
}

#[test]
fn temporaries_are_fresh_fields() {
    let (mut names, mut symbols) = tables(&TableConfig::default());
    let owner = symbols.synthesize_class(&mut names, "Scope");
    let a = symbols.new_temporary(&mut names, UniqueNameKind::Desugar, NameId::AND_AND, owner);
    let b = symbols.new_temporary(&mut names, UniqueNameKind::Desugar, NameId::AND_AND, owner);
    assert_ne!(a, b);
    let info = symbols.info(a);
    assert!(info.is_field());
    assert_eq!(info.owner, owner);
    assert_eq!(info.result(), SymbolId::NONE);
    assert!(info.arguments().is_empty());
    assert_eq!(names.text(info.name), None);
}

#[test]
fn members_survive_table_reallocation() {
    let config = TableConfig::small();
    let (mut names, mut symbols) = tables(&config);
    let owners: Vec<SymbolId> = (0..4)
        .map(|i| symbols.synthesize_class(&mut names, &format!("Owner{i}")))
        .collect();
    let mut expected: Vec<Vec<SymbolId>> = vec![Vec::new(); owners.len()];
    for i in 0..400 {
        let slot = i % owners.len();
        let name = names.intern_utf8(&format!("m{i}"));
        let id = symbols.declare_member(owners[slot], name, SymbolId::NONE, vec![], false);
        expected[slot].push(id);
    }
    for (owner, ids) in owners.iter().zip(&expected) {
        let recorded: Vec<SymbolId> = symbols.members(*owner).iter().map(|&(_, s)| s).collect();
        assert_eq!(&recorded, ids);
        for id in ids {
            assert_eq!(symbols.info(*id).owner, *owner);
        }
    }
}

#[test]
fn show_renders_owner_path() {
    let (mut names, mut symbols) = tables(&TableConfig::default());
    let class = symbols.synthesize_class(&mut names, "Outer");
    let meth = names.intern_utf8("inner");
    let member = symbols.declare_member(class, meth, SymbolId::NONE, vec![], true);
    assert_eq!(symbols.show(&names, member), "Outer::inner");
    assert_eq!(symbols.show(&names, SymbolId::ROOT), "<root>");
}
