//! Neutral cosmetic payloads for scrubbed frame entries
//!
//! Each scrub overwrites the identifying fields of one attribute payload in
//! place and leaves any other field of that payload alone. A payload whose
//! shape does not match is left untouched and reported as `false`.

use serde_json::{Map, Value, json};

/// Number of online loadout slots per team
pub const ONLINE_LOADOUT_SLOTS: usize = 28;

/// Team colour fields of `TAGame.Car_TA:TeamPaint`
pub const TEAM_PAINT: [(&str, i64); 4] = [
    ("accent_color", 90),
    ("accent_finish", 270),
    ("primary_color", 42),
    ("primary_finish", 270),
];

/// Catalogue entries of a stock car, per team
pub const NEUTRAL_LOADOUT: [(&str, i64); 16] = [
    ("antenna", 0),
    ("decal", 0),
    ("engine_audio", 0),
    ("topper", 0),
    ("body", 23),
    ("goal_explosion", 1903),
    ("rocket_trail", 63),
    ("trail", 1948),
    ("wheels", 363),
    ("version", 28),
    ("unknown1", 0),
    ("unknown2", 0),
    ("unknown3", 6153),
    ("unknown4", 0),
    ("unknown5", 3270),
    ("unknown6", 0),
];

const TEAMS: [&str; 2] = ["blue", "orange"];

/// Default camera profile
pub fn neutral_camera() -> Value {
    json!({
        "angle": -3,
        "distance": 260,
        "fov": 110,
        "height": 100,
        "stiffness": 0.35,
        "swivel_speed": 5,
        "transition_speed": 1.2,
    })
}

fn object_at<'a>(value: &'a mut Value, key: &str) -> Option<&'a mut Map<String, Value>> {
    value.get_mut(key).and_then(Value::as_object_mut)
}

fn overwrite(target: &mut Map<String, Value>, fields: &[(&str, i64)]) {
    for (key, number) in fields {
        target.insert((*key).to_string(), Value::from(*number));
    }
}

pub fn scrub_team_paint(value: &mut Value) -> bool {
    let Some(paint) = object_at(value, "team_paint") else {
        return false;
    };
    overwrite(paint, &TEAM_PAINT);
    true
}

pub fn scrub_loadout(value: &mut Value) -> bool {
    let Some(loadouts) = object_at(value, "loadouts") else {
        return false;
    };
    let mut scrubbed = false;
    for team in TEAMS {
        if let Some(slots) = loadouts.get_mut(team).and_then(Value::as_object_mut) {
            overwrite(slots, &NEUTRAL_LOADOUT);
            scrubbed = true;
        }
    }
    scrubbed
}

pub fn clear_online_loadouts(value: &mut Value) -> bool {
    let Some(online) = object_at(value, "loadouts_online") else {
        return false;
    };
    for team in TEAMS {
        let empty = vec![Value::Array(Vec::new()); ONLINE_LOADOUT_SLOTS];
        online.insert(team.to_string(), Value::Array(empty));
    }
    true
}

pub fn scrub_camera(value: &mut Value) -> bool {
    let Some(settings) = value.as_object_mut() else {
        return false;
    };
    settings.insert("cam_settings".to_string(), neutral_camera());
    true
}
