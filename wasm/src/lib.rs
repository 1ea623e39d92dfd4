use bracket_layout::{
    Layout, LayoutConfig, build_layout, layout_champion, parse_bracket, partition_by_winner_trees,
    window_layout,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BracketLayoutOptions {
    h_gap: Option<f64>,
    v_gap: Option<f64>,
    champion_only: Option<bool>,
}

fn build_layout_config(options: &BracketLayoutOptions) -> LayoutConfig {
    let mut config = LayoutConfig::default();
    if let Some(h_gap) = options.h_gap {
        config.h_gap = h_gap;
    }
    if let Some(v_gap) = options.v_gap {
        config.v_gap = v_gap;
    }
    config
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn layout_from_json(bracket_json: &str, options_json: Option<String>) -> Result<String, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<BracketLayoutOptions>(&raw).map_err(|e| e.to_string())?,
        None => BracketLayoutOptions::default(),
    };
    let input = parse_bracket(bracket_json).map_err(|e| e.to_string())?;
    let config = build_layout_config(&options);
    let layout = if options.champion_only.unwrap_or(false) {
        layout_champion(&input, &config)
    } else {
        build_layout(&input, &config)
    }
    .map_err(|e| e.to_string())?;
    serde_json::to_string(&layout).map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn build_layout_json(bracket_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_from_json(bracket_json, options_json).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn partition_json(bracket_json: &str) -> Result<String, JsValue> {
    let input = parse_bracket(bracket_json).map_err(to_js_error)?;
    serde_json::to_string(&partition_by_winner_trees(&input)).map_err(to_js_error)
}

#[wasm_bindgen]
pub fn window_layout_json(layout_json: &str, start_round: usize, end_round: usize) -> Result<String, JsValue> {
    let layout: Layout = serde_json::from_str(layout_json).map_err(to_js_error)?;
    serde_json::to_string(&window_layout(&layout, start_round, end_round)).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = r#"{ "matches": [
        { "id": "UP1", "winnerNextMatchId": "UF" },
        { "id": "UP2", "winnerNextMatchId": "UF" },
        { "id": "UF", "winnerNextMatchId": null },
        { "id": "C1", "winnerNextMatchId": "CF" },
        { "id": "CF", "winnerNextMatchId": null, "loserNextMatchId": null },
        { "id": "X", "winnerNextMatchId": null, "loserNextMatchId": "CF" }
    ] }"#;

    #[test]
    fn champion_only_layout_uses_gaps() {
        let json = layout_from_json(
            MIXED,
            Some(r#"{ "hGap": 100, "vGap": 10, "championOnly": true }"#.to_string()),
        )
        .expect("champion tree should lay out");
        let layout: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout.rounds.len(), 2);
        assert_eq!(layout.node("UF").unwrap().x, 100.0);
        assert_eq!(layout.node("UF").unwrap().y, 5.0);
    }

    #[test]
    fn full_mixed_layout_reports_root_count() {
        let err = layout_from_json(MIXED, None).unwrap_err();
        assert!(err.contains("expected exactly 1 final"));
    }
}
