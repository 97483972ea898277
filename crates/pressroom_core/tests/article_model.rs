use pressroom_core::{
    check_article_shape, format_display_date, is_valid_article_shape, Article, InlineImage,
    ShapeError,
};
use serde_json::json;

#[test]
fn article_new_sets_empty_defaults() {
    let article = Article::new(3);

    assert_eq!(article.id, 3);
    assert!(!article.is_featured);
    assert!(article.title.is_empty());
    assert!(article.content.is_empty());
    assert!(article.inline_images.is_empty());
}

#[test]
fn article_serialization_uses_expected_wire_fields() {
    let mut article = Article::new(12);
    article.is_featured = true;
    article.accent_color_class = "text-rose-600".to_string();
    article.border_color_class = "border-rose-600".to_string();
    article.inline_images = vec![
        InlineImage::with_caption("a.png", "Alpha"),
        InlineImage::new("b.png"),
    ];

    let json = serde_json::to_value(&article).unwrap();
    assert_eq!(json["id"], 12);
    assert_eq!(json["isFeatured"], true);
    assert_eq!(json["accentColorClass"], "text-rose-600");
    assert_eq!(json["borderColorClass"], "border-rose-600");
    assert_eq!(json["inlineImages"][0]["caption"], "Alpha");
    assert_eq!(json["inlineImages"][1]["caption"], "");

    let decoded: Article = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, article);
}

#[test]
fn missing_caption_reads_as_empty_and_writes_as_empty_text() {
    let image: InlineImage = serde_json::from_value(json!({"url": "c.png"})).unwrap();
    assert_eq!(image.caption(), None);
    assert_eq!(
        serde_json::to_string(&image).unwrap(),
        r#"{"url":"c.png","caption":""}"#
    );
    assert_eq!(
        InlineImage::with_caption("c.png", "Gamma").caption(),
        Some("Gamma")
    );
}

#[test]
fn serialized_article_passes_strict_shape_check() {
    let value = serde_json::to_value(Article::new(1)).unwrap();
    assert!(is_valid_article_shape(&value));
}

#[test]
fn strict_shape_check_rejects_partial_records() {
    let partial = json!({"id": 1, "title": "Only Title"});
    assert!(!is_valid_article_shape(&partial));
    assert_eq!(
        check_article_shape(&partial),
        Err(ShapeError::MissingField("isFeatured"))
    );
}

#[test]
fn display_dates_tolerate_garbage() {
    assert_eq!(format_display_date("2026-01-02"), "January 2, 2026");
    assert_eq!(format_display_date("yesterday"), "");
}
