use pressroom_core::{
    ArticlePatch, CategoryFilter, CollectionStore, DeskConfig, InlineImage, MoveDirection,
};
use std::sync::Arc;

const TODAY: &str = "October 19, 2026";

fn store() -> CollectionStore {
    CollectionStore::with_date_source(DeskConfig::default(), || TODAY.to_string())
}

fn titled(store: &mut CollectionStore, titles: &[&str]) -> Vec<i64> {
    titles
        .iter()
        .map(|title| {
            let id = store.add();
            assert!(store.update(id, &ArticlePatch::title(*title)));
            id
        })
        .collect()
}

fn order(store: &CollectionStore) -> Vec<i64> {
    store.articles().iter().map(|article| article.id).collect()
}

#[test]
fn add_appends_defaults_and_selects() {
    let mut store = store();
    let first = store.add();
    let second = store.add();

    assert_eq!((first, second), (1, 2));
    assert_eq!(store.selected_id(), Some(second));

    let article = store.get(second).unwrap();
    assert_eq!(article.category, "Technology");
    assert_eq!(article.accent_color_class, "text-blue-600");
    assert_eq!(article.border_color_class, "border-blue-600");
    assert_eq!(article.date, TODAY);
    assert_eq!(article.title, "");
    assert!(article.inline_images.is_empty());
    assert!(!article.is_featured);
}

#[test]
fn add_uses_configured_catalog() {
    let config = DeskConfig::from_json_str(r#"{"categories":["Sports","Travel"]}"#).unwrap();
    let mut store = CollectionStore::with_date_source(config, || TODAY.to_string());
    let id = store.add();
    assert_eq!(store.get(id).unwrap().category, "Sports");
}

#[test]
fn allocation_follows_max_id_after_deletes() {
    let mut store = store();
    let ids = titled(&mut store, &["a", "b", "c", "d"]);
    assert!(store.delete(ids[2]));

    assert_eq!(order(&store), vec![1, 2, 4]);
    assert_eq!(store.next_id(), 5);
    assert_eq!(store.add(), 5);
}

#[test]
fn duplicate_appends_copy_at_end_with_suffix() {
    let mut store = store();
    let ids = titled(&mut store, &["first", "second", "third"]);
    let mut patch = ArticlePatch::content("<p>body <image-1></p>");
    patch.author = Some("Grace".to_string());
    patch.inline_images = Some(vec![InlineImage::with_caption("a.png", "cap")]);
    store.select(ids[0]);
    assert!(store.update(ids[0], &patch));

    let copy_id = store.duplicate(ids[0]).expect("source exists");

    assert_eq!(copy_id, 4);
    assert_eq!(order(&store), vec![1, 2, 3, 4]);
    assert_eq!(store.selected_id(), Some(copy_id));

    let source = store.get(ids[0]).unwrap().clone();
    let copy = store.get(copy_id).unwrap();
    assert_eq!(copy.title, "first (Copy)");
    assert_eq!(copy.author, source.author);
    assert_eq!(copy.content, source.content);
    assert_eq!(copy.inline_images, source.inline_images);
    assert_eq!(copy.category, source.category);
    assert_eq!(copy.date, source.date);
}

#[test]
fn duplicate_unknown_id_is_noop() {
    let mut store = store();
    titled(&mut store, &["only"]);
    let before = store.snapshot();

    assert_eq!(store.duplicate(42), None);
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
    assert_eq!(store.selected_id(), Some(1));
}

#[test]
fn delete_clears_selection_only_for_selected_record() {
    let mut store = store();
    let ids = titled(&mut store, &["a", "b"]);
    store.select(ids[0]);

    assert!(store.delete(ids[1]));
    assert_eq!(store.selected_id(), Some(ids[0]));

    assert!(store.delete(ids[0]));
    assert_eq!(store.selected_id(), None);
    assert!(store.is_empty());
    assert!(!store.delete(ids[0]));
}

#[test]
fn move_swaps_neighbors_and_ignores_boundaries() {
    let mut store = store();
    let ids = titled(&mut store, &["a", "b", "c"]);

    assert!(!store.move_article(ids[0], MoveDirection::Up));
    assert!(!store.move_article(ids[2], MoveDirection::Down));
    assert!(!store.move_article(99, MoveDirection::Down));
    assert_eq!(order(&store), vec![1, 2, 3]);

    assert!(store.move_article(ids[0], MoveDirection::Down));
    assert_eq!(order(&store), vec![2, 1, 3]);
    assert!(store.move_article(ids[2], MoveDirection::Up));
    assert_eq!(order(&store), vec![2, 3, 1]);
}

#[test]
fn update_requires_selection_and_known_id() {
    let mut store = store();
    let id = store.add();
    store.clear_selection();

    assert!(!store.update(id, &ArticlePatch::title("ignored")));
    assert_eq!(store.get(id).unwrap().title, "");

    assert!(store.select(id));
    assert!(!store.update(77, &ArticlePatch::title("ignored")));
    assert!(store.update(id, &ArticlePatch::title("kept")));
    assert_eq!(store.get(id).unwrap().title, "kept");
}

#[test]
fn select_unknown_id_keeps_current_selection() {
    let mut store = store();
    let id = store.add();
    assert!(!store.select(500));
    assert_eq!(store.selected_id(), Some(id));
    assert_eq!(store.selected().map(|article| article.id), Some(id));
}

#[test]
fn mutations_never_touch_earlier_snapshots() {
    let mut store = store();
    let ids = titled(&mut store, &["a", "b"]);
    let before = store.snapshot();

    store.move_article(ids[0], MoveDirection::Down);
    store.update(ids[0], &ArticlePatch::title("changed"));
    store.delete(ids[1]);

    assert_eq!(before.len(), 2);
    assert_eq!(before[0].title, "a");
    assert_eq!(before[1].title, "b");
    assert!(!Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn filter_matches_terms_and_category_without_reordering() {
    let mut store = store();
    let ids = titled(&mut store, &["Rust Weekly", "Market Notes", "rusty tools"]);
    let mut patch = ArticlePatch::default();
    patch.category = Some("Business".to_string());
    store.update(ids[1], &patch);
    let mut patch = ArticlePatch::default();
    patch.summary = Some("About RUST".to_string());
    store.update(ids[1], &patch);

    let all: Vec<i64> = store
        .filter("rust", &CategoryFilter::All)
        .iter()
        .map(|article| article.id)
        .collect();
    assert_eq!(all, vec![1, 2, 3]);

    let business: Vec<i64> = store
        .filter("", &CategoryFilter::parse("Business"))
        .iter()
        .map(|article| article.id)
        .collect();
    assert_eq!(business, vec![2]);

    assert!(store.filter("nothing", &CategoryFilter::All).is_empty());
    assert_eq!(order(&store), vec![1, 2, 3]);
}

#[test]
fn inline_image_edits_keep_tokens_as_plain_text() {
    let mut store = store();
    let id = store.add();
    assert!(store.add_inline_image(id, InlineImage::new("one.png")));
    assert!(store.add_inline_image(id, InlineImage::new("two.png")));
    store.insert_image_token(id, 2, None).unwrap();

    assert!(store.move_inline_image(id, 1, MoveDirection::Up));
    assert!(!store.move_inline_image(id, 0, MoveDirection::Up));
    assert!(store.remove_inline_image(id, 1));
    assert!(!store.remove_inline_image(id, 5));
    assert!(store.update_inline_image(id, 0, InlineImage::with_caption("new.png", "c")));

    let article = store.get(id).unwrap();
    assert_eq!(article.inline_images, vec![InlineImage::with_caption("new.png", "c")]);
    assert_eq!(article.content, "<image-2>");
}

#[test]
fn insert_image_token_uses_caret_when_given() {
    let mut store = store();
    let id = store.add();
    store.select(id);
    store.update(id, &ArticlePatch::content("before after"));

    let caret = store.insert_image_token(id, 1, Some(7)).unwrap();
    assert_eq!(caret, 16);
    assert_eq!(store.get(id).unwrap().content, "before <image-1>after");
    assert_eq!(store.insert_image_token(404, 1, None), None);
}

#[test]
fn allocation_never_reuses_a_live_id_at_the_top_of_the_range() {
    let mut store = store();
    let payload = format!(r#"[{{"id": {}}}]"#, i64::MAX);
    store.import_json(&payload).unwrap();

    let added = store.add();
    let copied = store.duplicate(added).unwrap();

    assert_eq!((added, copied), (1, 2));
    assert_eq!(order(&store), vec![i64::MAX, 1, 2]);
}
