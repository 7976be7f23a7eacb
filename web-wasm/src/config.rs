//! ページに埋め込まれた設定の読み込み
//!
//! `<script id="snapcheck-config" type="application/json">` があればそれを使い、
//! なければデフォルト設定で動く。

use snapcheck_common::ClientConfig;

const CONFIG_ELEMENT_ID: &str = "snapcheck-config";

pub fn load_config() -> ClientConfig {
    let text = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    config_from_text(text.as_deref())
}

fn config_from_text(text: Option<&str>) -> ClientConfig {
    let Some(json) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return ClientConfig::default();
    };

    match ClientConfig::from_json(json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("#{} ignored: {}", CONFIG_ELEMENT_ID, e);
            ClientConfig::default()
        }
    }
}
