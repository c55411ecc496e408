//! Integration tests for the anonymiser
//!
//! Drives whole documents, decoded from codec-shaped JSON, through
//! [`crate::anonymise`] and [`crate::Anonymiser`].


#[cfg(test)]
pub(crate) mod test_utils {
    use serde_json::{Value, json};

    use anonymiser_shared::Document;

    use crate::config::AnonymiseConfig;
    use crate::test_utils::fixed_time;

    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("anonymiser_core=debug")
            .try_init();
    }

    pub fn config() -> AnonymiseConfig {
        AnonymiseConfig::default()
            .with_replay_name("Anonymised")
            .with_timestamp(fixed_time())
    }

    pub fn str_node(text: &str) -> Value {
        json!({"index": 0, "kind": "StrProperty", "size": text.encode_utf16().count(), "value": {"str": text}})
    }

    fn int_node(value: i64) -> Value {
        json!({"index": 0, "kind": "IntProperty", "size": 4, "value": {"int": value}})
    }

    pub fn stat_json(name: &str, with_player_id: bool) -> Value {
        let mut elements = vec![
            json!(["Name", str_node(name)]),
            json!(["Platform", {"index": 0, "kind": "ByteProperty", "size": 29,
                "value": {"byte": ["OnlinePlatform", {"Right": "OnlinePlatform_Steam"}]}}]),
            json!(["OnlineID", qword_node("76561198000000042")]),
            json!(["Team", int_node(0)]),
            json!(["Score", int_node(412)]),
            json!(["Goals", int_node(2)]),
            json!(["Assists", int_node(1)]),
            json!(["Saves", int_node(3)]),
            json!(["Shots", int_node(5)]),
            json!(["bBot", {"index": 0, "kind": "BoolProperty", "size": 0, "value": {"bool": 0}}]),
        ];
        if with_player_id {
            elements.push(json!(["PlayerID", player_id_json()]));
        }
        json!({"elements": elements, "last_key": "None"})
    }

    fn qword_node(value: &str) -> Value {
        json!({"index": 0, "kind": "QWordProperty", "size": 8, "value": {"q_word": value}})
    }

    fn struct_node(size: u32, name: &str, elements: Vec<Value>) -> Value {
        json!({"index": 0, "kind": "StructProperty", "size": size, "value": {"struct": {
            "name": name,
            "fields": {"elements": elements, "last_key": "None"}
        }}})
    }

    fn player_id_json() -> Value {
        let handle = struct_node(60, "SceNpOnlineId", vec![
            json!(["Data", qword_node("99")]),
            json!(["Term", {"index": 0, "kind": "ByteProperty", "size": 1, "value": {"byte": 0}}]),
            json!(["Dummy", {"index": 0, "kind": "ByteProperty", "size": 3, "value": {"byte": [0, 0, 0]}}]),
        ]);
        let np_id = struct_node(120, "SceNpId", vec![
            json!(["Handle", handle]),
            json!(["Opt", qword_node("7")]),
            json!(["Reserved", qword_node("8")]),
        ]);
        struct_node(211, "UniqueNetId", vec![
            json!(["Uid", qword_node("76561198000000042")]),
            json!(["NpId", np_id]),
            json!(["EpicAccountId", str_node("0123456789abcdef0123456789abcdef")]),
            json!(["Platform", {"index": 0, "kind": "ByteProperty", "size": 29,
                "value": {"byte": ["OnlinePlatform", {"Right": "OnlinePlatform_Steam"}]}}]),
            json!(["SplitscreenID", int_node(0)]),
        ])
    }

    pub fn goal_json(scorer: &str) -> Value {
        json!({"elements": [
            ["frame", int_node(2400)],
            ["PlayerName", str_node(scorer)],
            ["PlayerTeam", int_node(1)]
        ], "last_key": "None"})
    }

    pub fn name_update(actor: u32, player: &str) -> Value {
        json!({
            "actor_id": {"limit": 2047, "value": actor},
            "value": {"updated": [
                {"id": {"limit": 111, "value": 40}, "name": "Engine.PlayerReplicationInfo:PlayerName", "value": {"string": player}}
            ]}
        })
    }

    /// Codec-shaped document JSON
    pub fn replay_json(players: &[&str], scorers: &[&str], frames: Vec<Value>) -> Value {
        let stats: Vec<Value> = players.iter().map(|p| stat_json(p, true)).collect();
        let goals: Vec<Value> = scorers.iter().map(|s| goal_json(s)).collect();
        json!({
            "header": {
                "body": {
                    "engine_version": 868,
                    "licensee_version": 32,
                    "patch_version": 10,
                    "label": "TAGame.Replay_Soccar_TA",
                    "properties": {"elements": [
                        ["TeamSize", int_node(players.len().div_ceil(2) as i64)],
                        ["Team0Score", int_node(2)],
                        ["Goals", {"index": 0, "kind": "ArrayProperty", "size": 420, "value": {"array": goals}}],
                        ["PlayerStats", {"index": 0, "kind": "ArrayProperty", "size": 3100, "value": {"array": stats}}],
                        ["ReplayName", str_node("Ranked doubles")],
                        ["Id", str_node("5A4C8E2B4A0C1F6E9D3B7A1C2E4F6A8B")],
                        ["MapName", {"index": 0, "kind": "NameProperty", "size": 9, "value": {"name": "stadium_p"}}],
                        ["Date", str_node("2021-05-09 21-14-03")],
                        ["MatchStartEpoch", {"index": 0, "kind": "QWordProperty", "size": 8, "value": {"q_word": "1620587643"}}],
                        ["NumFrames", int_node(9000)],
                        ["MatchType", {"index": 0, "kind": "NameProperty", "size": 6, "value": {"name": "Online"}}],
                        ["PlayerName", str_node(players.first().copied().unwrap_or(""))],
                        ["KeyframeDelay", {"index": 0, "kind": "FloatProperty", "size": 4, "value": {"float": 2.0}}],
                        ["MaxChannels", int_node(1023)],
                        ["MaxReplaySizeMB", int_node(500)],
                        ["RecordFPS", {"index": 0, "kind": "FloatProperty", "size": 4, "value": {"float": 30.0}}]
                    ], "last_key": "None"}
                },
                "crc": 305419896,
                "size": 6000
            },
            "content": {
                "body": {
                    "frames": frames,
                    "key_frames": [
                        {"frame": 0, "position": 0, "time": 0.0},
                        {"frame": 300, "position": 48213, "time": 10.0},
                        {"frame": 600, "position": 97120, "time": 20.0}
                    ],
                    "stream_size": 250000,
                    "messages": [{"frame": 120, "name": "Alice", "value": "what a save!"}],
                    "caches": [],
                    "class_mappings": [],
                    "levels": ["stadium_p"],
                    "marks": [],
                    "names": [],
                    "objects": ["Engine.PlayerReplicationInfo:PlayerName"],
                    "packages": [],
                    "unknown": []
                },
                "crc": 2271560481u32,
                "size": 260000
            }
        })
    }

    pub fn decode(json: Value) -> Document {
        serde_json::from_value(json).unwrap()
    }
}
