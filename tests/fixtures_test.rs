use post_reader::{FixtureStore, UserRole};

#[test]
fn test_featured_post_with_audio() {
    let store = FixtureStore::new();
    let post = store.post("1").expect("post 1 exists");

    assert_eq!(post.title, "唯独恩典：改革宗信仰的核心");
    assert!(post.is_featured);
    assert!(post.audio_url.as_deref().is_some_and(|url| !url.is_empty()));
    assert_eq!(post.author.role, UserRole::Admin);
}

#[test]
fn test_absent_post() {
    let store = FixtureStore::new();
    assert!(store.post("999").is_none());
}

#[test]
fn test_christology_walks_to_doctrine_in_one_step() {
    let store = FixtureStore::new();
    let path = store.category_path("c2");

    let names: Vec<_> = path.iter().map(|category| category.name.as_str()).collect();
    assert_eq!(names, vec!["基督论", "教义"]);
    assert_eq!(path.len() - 1, 1);
    assert!(path.last().is_some_and(|root| root.is_root() && root.id == "c1"));
}

#[test]
fn test_category_tree_shape() {
    let store = FixtureStore::new();

    let roots: Vec<_> = store.root_categories().map(|c| c.id.as_str()).collect();
    assert_eq!(roots, vec!["c1", "c4", "c6"]);

    let children: usize = roots.iter().map(|id| store.children(id).count()).sum();
    assert_eq!(children, store.categories().len() - roots.len());

    for category in store.categories() {
        let path = store.category_path(&category.id);
        assert!(path.last().is_some_and(|root| root.is_root()));
    }
}

#[test]
fn test_posts_serialize_with_camel_case_fields() {
    let store = FixtureStore::new();
    let value = serde_json::to_value(store.post("1").unwrap()).unwrap();

    assert_eq!(value["isFeatured"], serde_json::Value::Bool(true));
    assert!(value["audioUrl"].is_string());
    assert!(value["coverImage"].is_string());
    assert_eq!(value["category"]["parentId"], "c1");
    assert_eq!(value["author"]["role"], "admin");
}
