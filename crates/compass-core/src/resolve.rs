//! Global and per-channel parameter lookup on a board element.

use compass_xml::Element;
use tracing::trace;

use crate::format::FormatterRegistry;

/// Values found for one parameter key on one board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedParameter {
    /// Board-level values in document order. Only the first one is used.
    pub globals: Vec<String>,
    /// `(channel index, value)` overrides in channel document order.
    pub overrides: Vec<(String, String)>,
}

impl ResolvedParameter {
    /// Board-wide value applied to every channel unless overridden.
    pub fn global(&self) -> Option<&str> {
        self.globals.first().map(String::as_str)
    }

    /// Format the global and every override value as values of `key`.
    /// Keys without a registered formatter are returned unchanged.
    pub fn formatted(self, formatters: &FormatterRegistry, key: &str) -> Self {
        ResolvedParameter {
            globals: self
                .globals
                .into_iter()
                .map(|value| formatters.apply(key, &value))
                .collect(),
            overrides: self
                .overrides
                .into_iter()
                .map(|(channel, value)| {
                    let value = formatters.apply(key, &value);
                    (channel, value)
                })
                .collect(),
        }
    }
}

/// Collect the board-level and channel-level values of `key` on `board`.
///
/// Missing `parameters`, `channel`, `index` or `values` nodes contribute
/// nothing. Entries without a key or without a value are skipped.
pub fn resolve(board: &Element, key: &str) -> ResolvedParameter {
    let globals: Vec<String> = matching_values(board.child("parameters"), key)
        .map(str::to_string)
        .collect();

    let mut overrides = Vec::new();
    for channel in board.children_named("channel") {
        let Some(index) = channel.child_text("index") else {
            trace!(key, "channel without index skipped");
            continue;
        };
        for value in matching_values(channel.child("values"), key) {
            overrides.push((index.to_string(), value.to_string()));
        }
    }

    trace!(
        key,
        globals = globals.len(),
        overrides = overrides.len(),
        "resolved parameter"
    );
    ResolvedParameter { globals, overrides }
}

fn matching_values<'a>(
    collection: Option<&'a Element>,
    key: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    collection
        .into_iter()
        .flat_map(|collection| collection.children_named("entry"))
        .filter(move |entry| entry.child_text("key") == Some(key))
        .filter_map(entry_value)
}

/// Value of an entry: the nested `value/value` text when present, otherwise
/// the text of `value` itself.
fn entry_value(entry: &Element) -> Option<&str> {
    let value = entry.child("value")?;
    value.child_text("value").or_else(|| value.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    fn board(xml: &str) -> Element {
        compass_xml::parse(xml).expect("parse board").into_root()
    }

    #[test]
    fn global_and_overrides_in_document_order() {
        let board = board(
            r#"<board>
                <parameters>
                    <entry><key>SRV_PARAM_CH_THRESHOLD</key><value><value>100</value></value></entry>
                    <entry><key>SRV_PARAM_RECLEN</key><value><value>2048</value></value></entry>
                </parameters>
                <channel>
                    <index>3</index>
                    <values>
                        <entry><key>SRV_PARAM_CH_THRESHOLD</key><value>150</value></entry>
                    </values>
                </channel>
                <channel>
                    <index>5</index>
                    <values>
                        <entry><key>SRV_PARAM_CH_THRESHOLD</key><value><value>175</value></value></entry>
                    </values>
                </channel>
            </board>"#,
        );
        let resolved = resolve(&board, "SRV_PARAM_CH_THRESHOLD");
        assert_eq!(resolved.global(), Some("100"));
        assert_eq!(
            resolved.overrides,
            vec![
                ("3".to_string(), "150".to_string()),
                ("5".to_string(), "175".to_string())
            ]
        );

        let reclen = resolve(&board, "SRV_PARAM_RECLEN");
        assert_eq!(reclen.global(), Some("2048"));
        assert!(reclen.overrides.is_empty());
    }

    #[test]
    fn first_global_wins_when_duplicated() {
        let board = board(
            r#"<board><parameters>
                <entry><key>K</key><value><value>a</value></value></entry>
                <entry><key>K</key><value><value>b</value></value></entry>
            </parameters></board>"#,
        );
        let resolved = resolve(&board, "K");
        assert_eq!(resolved.globals, ["a", "b"]);
        assert_eq!(resolved.global(), Some("a"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let board = board(
            r#"<board>
                <parameters>
                    <entry><value><value>orphan</value></value></entry>
                    <entry><key>K</key></entry>
                    <entry><key>K</key><value/></entry>
                    <entry><key>K</key><value><value>ok</value></value></entry>
                </parameters>
                <channel><values><entry><key>K</key><value>no index</value></entry></values></channel>
                <channel><index>1</index></channel>
                <channel><index>2</index><values><entry><key>K</key></entry></values></channel>
            </board>"#,
        );
        let resolved = resolve(&board, "K");
        assert_eq!(resolved.globals, ["ok"]);
        assert!(resolved.overrides.is_empty());
    }

    #[test]
    fn bare_board_resolves_to_nothing() {
        let resolved = resolve(&board("<board/>"), "K");
        assert_eq!(resolved, ResolvedParameter::default());
        assert_eq!(resolved.global(), None);
    }

    #[test]
    fn padded_key_matches_after_trimming() {
        let board = board(
            r#"<board><parameters>
                <entry><key>SRV_PARAM_CH_THRESHOLD_2</key><value><value>1</value></value></entry>
                <entry><key> SRV_PARAM_CH_THRESHOLD</key><value><value>2</value></value></entry>
            </parameters></board>"#,
        );
        // Key text is trimmed at load time: the padded key matches, the suffixed one does not.
        assert_eq!(resolve(&board, "SRV_PARAM_CH_THRESHOLD").globals, ["2"]);
    }

    #[test]
    fn formatter_applies_to_global_and_overrides() {
        let registry = FormatterRegistry::with_builtin();
        let resolved = ResolvedParameter {
            globals: vec!["COARSE_GAIN_X4".into()],
            overrides: vec![("1".into(), "COARSE_GAIN_X16".into())],
        }
        .formatted(&registry, keys::CH_COARSE_GAIN);
        assert_eq!(resolved.global(), Some("4x"));
        assert_eq!(resolved.overrides, vec![("1".to_string(), "16x".to_string())]);
    }

    #[test]
    fn unregistered_key_is_left_verbatim() {
        let registry = FormatterRegistry::with_builtin();
        let raw = ResolvedParameter {
            globals: vec!["COARSE_GAIN_X4".into()],
            overrides: vec![("2".into(), "COARSE_GAIN_X8".into())],
        };
        assert_eq!(raw.clone().formatted(&registry, keys::CH_THRESHOLD), raw);
    }
}
