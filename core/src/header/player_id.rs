//! `PlayerID` platform identity scrubbing

use serde_json::json;

use anonymiser_shared::{PropertyMap, PropertyNode, PropertyValue};

use crate::rules::{HANDLE_DATA, NpIdRule, PlayerIdRule, np_id_rule, player_id_rule};
use crate::schema::{HANDLE_SCOPE, NP_ID_SCOPE, PLAYER_ID_SCOPE, SchemaDrift};

/// Declared size of the neutral platform enum
pub const NEUTRAL_PLATFORM_SIZE: u32 = 27;

/// `OnlinePlatform_Unknown` byte value and its declared size
pub fn neutral_platform() -> (PropertyValue, u32) {
    (
        PropertyValue::Byte(json!(["OnlinePlatform", {"Right": "OnlinePlatform_Unknown"}])),
        NEUTRAL_PLATFORM_SIZE,
    )
}

fn zero_qword(node: &mut PropertyNode) {
    node.set_value(PropertyValue::QWord("0".to_string()));
}

fn struct_fields(node: &mut PropertyNode) -> Option<&mut PropertyMap> {
    node.value.as_struct_mut().map(|s| &mut s.fields)
}

/// Zero every platform identifier inside a `PlayerID` struct
///
/// Returns the drift found in the struct and its nested `NpId`/`Handle`.
pub fn scrub_player_id(node: &mut PropertyNode) -> Vec<SchemaDrift> {
    let kind = node.kind;
    let Some(fields) = struct_fields(node) else {
        tracing::warn!(?kind, "PlayerID is not a struct, left untouched");
        return Vec::new();
    };

    let mut drift = PLAYER_ID_SCOPE.check(fields.keys());
    for (key, field) in fields.iter_mut() {
        match player_id_rule(key) {
            Some(PlayerIdRule::Uid) => zero_qword(field),
            Some(PlayerIdRule::EpicAccountId) => field.set_value(PropertyValue::Str(String::new())),
            Some(PlayerIdRule::Platform) => {
                let (value, size) = neutral_platform();
                field.set_value_sized(value, size);
            }
            Some(PlayerIdRule::NpId) => drift.extend(scrub_np_id(field)),
            None => {}
        }
    }
    drift
}

fn scrub_np_id(node: &mut PropertyNode) -> Vec<SchemaDrift> {
    let Some(fields) = struct_fields(node) else {
        return Vec::new();
    };

    let mut drift = NP_ID_SCOPE.check(fields.keys());
    for (key, field) in fields.iter_mut() {
        match np_id_rule(key) {
            Some(NpIdRule::Opt | NpIdRule::Reserved) => zero_qword(field),
            Some(NpIdRule::Handle) => {
                if let Some(handle) = struct_fields(field) {
                    drift.extend(HANDLE_SCOPE.check(handle.keys()));
                    if let Some(data) = handle.get_mut(HANDLE_DATA) {
                        zero_qword(data);
                    }
                }
            }
            None => {}
        }
    }
    drift
}
