//! Typing sessions against real dictionaries

use liushu_engine::{DictItem, Dictionary, Formula};
use liushu_im::config::Settings;
use liushu_im::{BufferHost, CompositionEngine, EngineConfig, KeyEvent, MatcherManager};

fn item(text: &str, code: &str, weight: u32) -> DictItem {
    DictItem {
        text: text.to_string(),
        code: code.to_string(),
        weight,
        comment: None,
    }
}

fn sample_dict() -> Dictionary {
    Dictionary::build_from_items(vec![
        item("你", "ni", 100),
        item("呢", "ne", 50),
        item("泥", "ni", 30),
        item("你好", "nih", 80),
        item("好", "hao", 90),
        item("号", "hao", 40),
        item("和", "he", 60),
    ])
    .unwrap()
}

fn type_str<M: liushu_im::Matcher>(engine: &mut CompositionEngine<M, BufferHost>, s: &str) {
    for c in s.chars() {
        engine.handle_key(&KeyEvent::Alpha(c));
    }
}

fn texts<M: liushu_im::Matcher>(engine: &CompositionEngine<M, BufferHost>) -> Vec<String> {
    engine
        .candidates()
        .candidates()
        .iter()
        .map(|c| c.text.clone())
        .collect()
}

#[test]
fn test_prefix_candidates_follow_weight() {
    let mut engine = CompositionEngine::new(sample_dict(), BufferHost::new());

    type_str(&mut engine, "n");
    assert_eq!(texts(&engine), vec!["你", "你好", "呢", "泥"]);

    type_str(&mut engine, "i");
    assert_eq!(texts(&engine), vec!["你", "你好", "泥"]);
    assert_eq!(engine.candidates().get(1).map(|c| c.code.as_str()), Some("nih"));
}

#[test]
fn test_session_with_cascade() {
    let mut engine = CompositionEngine::new(sample_dict(), BufferHost::new());

    type_str(&mut engine, "haoni");
    assert_eq!(engine.committed_input(), "hao");
    assert_eq!(engine.pending_buffer(), "ni");

    assert!(engine.select_candidate(0));
    assert_eq!(engine.committed_input(), "ni");
    assert_eq!(engine.pending_buffer(), "");
    assert_eq!(texts(&engine), vec!["你", "你好", "泥"]);

    assert!(engine.select_candidate(0));
    engine.handle_key(&KeyEvent::Period);
    assert_eq!(engine.host().text(), "好你。");
    assert_eq!(engine.display_input(), "");
}

#[test]
fn test_unmatched_tail_flushed_by_enter() {
    let mut engine = CompositionEngine::new(sample_dict(), BufferHost::new());

    type_str(&mut engine, "nihao");
    assert_eq!(engine.committed_input(), "nih");
    assert_eq!(engine.pending_buffer(), "ao");
    assert_eq!(texts(&engine), vec!["你好"]);

    assert!(engine.select_candidate(0));
    assert_eq!(engine.display_input(), "ao");
    assert!(engine.candidates().is_empty());

    engine.handle_key(&KeyEvent::Enter);
    assert_eq!(engine.host().text(), "你好ao");
}

#[test]
fn test_compiled_formula_session() {
    let dir = tempfile::tempdir().unwrap();
    let source_dir = dir.path().join("formulas");
    let target_dir = dir.path().join("target");
    std::fs::create_dir_all(source_dir.join("demo")).unwrap();
    std::fs::write(
        source_dir.join("demo").join("words.tsv"),
        "# demo formula\n你\tni\t100\n好\thao\t90\n",
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.formulas = vec![Formula {
        id: "demo".to_string(),
        name: Some("Demo".to_string()),
        dictionaries: vec!["words.tsv".to_string()],
    }];
    settings.active_formula = Some("demo".to_string());
    settings.candidates.page_size = 5;
    settings.formulas[0].compile(&source_dir, &target_dir).unwrap();

    let matchers = MatcherManager::from_settings(&settings, &target_dir);
    assert_eq!(matchers.active_id(), Some("demo"));

    let mut engine =
        CompositionEngine::with_config(matchers, BufferHost::new(), EngineConfig::from(&settings));
    assert_eq!(engine.candidates().page_size(), 5);

    type_str(&mut engine, "nihao");
    assert_eq!(engine.display_input(), "ni hao");
    assert!(engine.select_on_page(1));
    assert_eq!(engine.committed_input(), "hao");
    assert!(engine.select_on_page(1));
    assert_eq!(engine.host().text(), "你好");
}
