use std::sync::Arc;

use zbx_query::editor::QueryEditor;
use zbx_query::models::CandidateEntry;
use zbx_query::panel::QueryPanel;
use zbx_query::test_utils::{resolver_for, sample_catalog, sample_store};

#[tokio::test]
async fn edited_target_can_be_duplicated_and_reordered() {
    let mut panel = QueryPanel::new();
    let target = panel.add_target().clone();

    let mut editor = QueryEditor::new(target, resolver_for(Arc::new(sample_catalog())));
    let store = sample_store();
    editor.init(&store).await;
    editor.select_host_group(Some(CandidateEntry::new("Linux servers")), &store).await;
    *panel.get_mut(0).unwrap() = editor.into_target();

    panel.duplicate(0).unwrap();
    panel.add_target();
    panel.move_target(2, 0).unwrap();

    let ids: Vec<_> = panel.targets().iter().map(|t| t.ref_id.as_str()).collect();
    assert_eq!(ids, ["C", "A", "B"]);
    assert_eq!(panel.targets()[2].group, Some(CandidateEntry::new("Linux servers")));
    assert_eq!(panel.targets()[0].group, None);
}

#[test]
fn panel_serializes_targets_in_order() {
    let mut panel = QueryPanel::new();
    panel.add_target().alias = "first".to_string();
    panel.add_target().alias = "second".to_string();

    let json = serde_json::to_value(&panel).unwrap();
    assert_eq!(json["targets"][0]["refId"], "A");
    assert_eq!(json["targets"][1]["alias"], "second");

    let back: QueryPanel = serde_json::from_value(json).unwrap();
    assert_eq!(back, panel);
}
