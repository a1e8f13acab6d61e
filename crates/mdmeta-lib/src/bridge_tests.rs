use mdmeta_core::{Field, FieldType, Metadata, MetadataMap};

use crate::bridge::{
    CompileListener, FieldOwner, MetadataBridge, MetadataOwner, PostChange, VariableDescription,
    copy_field_metadata, restore_local_variables,
};

fn function() -> FieldOwner {
    FieldOwner::new("Func")
        .with_metadata("Category", "Combat")
        .with_field(Field::new("Count", FieldType::Int).with_metadata("ClampMin", "0"))
        .with_field(Field::new("Label", FieldType::String))
}

fn field_metadata(owner: &FieldOwner, name: &str) -> Metadata {
    owner
        .field_metadata(name)
        .map(|metadata| metadata.snapshot())
        .unwrap_or_default()
}

#[test]
fn metadata_survives_recompile() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();

    bridge.pre_change(&owner);
    owner.regenerate();
    assert!(field_metadata(&owner, "Count").is_empty());

    let result = bridge.post_change(&mut owner);
    assert_eq!(result, PostChange::Restored { fields: 1 });
    assert_eq!(
        field_metadata(&owner, "Count"),
        Metadata::new().with("ClampMin", "0")
    );
    assert_eq!(owner.metadata, Metadata::new().with("Category", "Combat"));
    assert!(bridge.is_empty());
}

#[test]
fn fields_without_metadata_are_not_captured() {
    let mut bridge = MetadataBridge::new();
    let owner = function();

    bridge.pre_change(&owner);
    let cached = bridge.cached("Func").unwrap();
    assert_eq!(cached.count, 1);
    assert_eq!(cached.fields.keys().collect::<Vec<_>>(), ["Count"]);
}

#[test]
fn nested_changes_restore_once() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();

    bridge.pre_change(&owner);
    owner.regenerate();
    // The inner capture must not overwrite the outer snapshot.
    bridge.pre_change(&owner);
    assert_eq!(bridge.depth("Func"), 2);

    assert_eq!(bridge.post_change(&mut owner), PostChange::Pending { depth: 1 });
    assert!(field_metadata(&owner, "Count").is_empty());

    assert_eq!(
        bridge.post_change(&mut owner),
        PostChange::Restored { fields: 1 }
    );
    assert_eq!(
        field_metadata(&owner, "Count"),
        Metadata::new().with("ClampMin", "0")
    );

    assert_eq!(bridge.post_change(&mut owner), PostChange::Untracked);
}

#[test]
fn restore_matches_fields_by_name() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();

    bridge.pre_change(&owner);
    owner.fields = vec![
        Field::new("Label", FieldType::String),
        Field::new("Count", FieldType::Int64),
    ];
    bridge.post_change(&mut owner);

    assert_eq!(
        field_metadata(&owner, "Count"),
        Metadata::new().with("ClampMin", "0")
    );
    assert!(field_metadata(&owner, "Label").is_empty());
}

#[test]
fn removed_fields_are_skipped() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();

    bridge.pre_change(&owner);
    owner.fields.retain(|field| field.name != "Count");
    assert_eq!(
        bridge.post_change(&mut owner),
        PostChange::Restored { fields: 0 }
    );
}

#[test]
fn restore_overwrites_edits_made_during_change() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();

    bridge.pre_change(&owner);
    owner.regenerate();
    if let Some(metadata) = owner.field_metadata_mut("Count") {
        metadata.set("ClampMin", "5");
        metadata.set("ClampMax", "9");
    }
    bridge.post_change(&mut owner);

    assert_eq!(
        field_metadata(&owner, "Count"),
        Metadata::new().with("ClampMin", "0").with("ClampMax", "9")
    );
}

#[test]
fn untracked_post_change_is_a_no_op() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();
    assert_eq!(bridge.post_change(&mut owner), PostChange::Untracked);
    assert_eq!(owner, function());
}

#[test]
fn invalid_owner_is_not_captured() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();
    owner.invalidate();

    bridge.pre_change(&owner);
    assert!(!bridge.is_tracking("Func"));
}

#[test]
fn owner_invalidated_mid_change_is_abandoned() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();

    bridge.pre_change(&owner);
    owner.regenerate();
    owner.invalidate();

    assert_eq!(bridge.post_change(&mut owner), PostChange::Abandoned);
    assert!(field_metadata(&owner, "Count").is_empty());
    assert!(!bridge.is_tracking("Func"));
    assert!(bridge.is_empty());
}

#[test]
fn recreated_owner_gets_fresh_snapshot() {
    let mut bridge = MetadataBridge::new();
    let mut deleted = function();
    bridge.pre_change(&deleted);
    deleted.invalidate();
    assert_eq!(bridge.post_change(&mut deleted), PostChange::Abandoned);

    let mut recreated = FieldOwner::new("Func")
        .with_field(Field::new("Count", FieldType::Int).with_metadata("ClampMin", "5"));
    bridge.pre_change(&recreated);
    assert_eq!(bridge.depth("Func"), 1);
    recreated.regenerate();

    assert_eq!(
        bridge.post_change(&mut recreated),
        PostChange::Restored { fields: 1 }
    );
    assert_eq!(
        field_metadata(&recreated, "Count"),
        Metadata::new().with("ClampMin", "5")
    );
    assert!(bridge.is_empty());
}

#[test]
fn purge_drops_snapshots_of_deleted_owners() {
    let mut bridge = MetadataBridge::new();
    bridge.pre_change(&function());

    assert_eq!(bridge.purge(|key| key != "Func"), 1);
    assert!(bridge.is_empty());
}

#[test]
fn purge_keeps_live_owners() {
    let mut bridge = MetadataBridge::new();
    bridge.pre_change(&FieldOwner::new("A"));
    bridge.pre_change(&FieldOwner::new("B"));

    assert_eq!(bridge.purge(|key| key == "B"), 1);
    assert!(!bridge.is_tracking("A"));
    assert!(bridge.is_tracking("B"));
}

#[test]
fn shutdown_drops_open_snapshots() {
    let mut bridge = MetadataBridge::new();
    bridge.pre_change(&function());
    assert_eq!(bridge.len(), 1);

    bridge.shutdown();
    assert!(bridge.is_empty());
}

#[test]
fn owners_are_tracked_independently() {
    let mut bridge = MetadataBridge::new();
    let mut first = function();
    let mut second = FieldOwner::new("Other")
        .with_field(Field::new("Count", FieldType::Int).with_metadata("UIMax", "10"));

    bridge.pre_change(&first);
    bridge.pre_change(&second);
    first.regenerate();
    second.regenerate();

    assert_eq!(
        bridge.post_change(&mut second),
        PostChange::Restored { fields: 1 }
    );
    assert!(bridge.is_tracking("Func"));
    assert_eq!(
        field_metadata(&second, "Count"),
        Metadata::new().with("UIMax", "10")
    );

    bridge.post_change(&mut first);
    assert_eq!(
        field_metadata(&first, "Count"),
        Metadata::new().with("ClampMin", "0")
    );
}

#[test]
fn compile_listener_drives_bridge() {
    let mut bridge = MetadataBridge::new();
    let mut owner = function();

    {
        let listener: &mut dyn CompileListener = &mut bridge;
        listener.on_pre_compile(&owner);
        owner.regenerate();
        listener.on_post_compile(&mut owner);
    }

    assert_eq!(
        field_metadata(&owner, "Count"),
        Metadata::new().with("ClampMin", "0")
    );
    assert!(bridge.is_empty());
}

#[test]
fn local_variables_are_restored_from_descriptions() {
    let mut owner = FieldOwner::new("Func")
        .with_field(Field::new("Index", FieldType::Int))
        .with_field(Field::new("Name", FieldType::Name));
    let variables = [
        VariableDescription::new("Index").with_metadata("ClampMin", "0"),
        VariableDescription::new("Name"),
        VariableDescription::new("Stale").with_metadata("UIMax", "1"),
    ];

    assert_eq!(restore_local_variables(&mut owner, &variables), 1);
    assert_eq!(
        field_metadata(&owner, "Index"),
        Metadata::new().with("ClampMin", "0")
    );
    assert!(field_metadata(&owner, "Name").is_empty());
}

#[test]
fn parameters_are_copied_from_previous_compilation() {
    let previous = function();
    let mut regenerated = previous.clone();
    regenerated.regenerate();

    assert_eq!(copy_field_metadata(&previous, &mut regenerated), 1);
    assert_eq!(
        field_metadata(&regenerated, "Count"),
        Metadata::new().with("ClampMin", "0")
    );
    assert!(regenerated.metadata.is_empty());
}
