//! End-to-end runs through the driver

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use recast_core::prelude::*;
use recast_test_utils::{
    bean, bean_classes, beans_document, path, plain_text, runnable, source_set, text_at,
};

fn append(target: &str, content: &str, strategy: ExistingFileStrategy) -> RecipeSpec {
    AppendToTextFile::new(path(target), content)
        .with_strategy(strategy)
        .into()
}

fn change_class(old: Option<&str>, new: &str) -> RecipeSpec {
    ChangeXmlAttribute::new("bean", "class", old.map(str::to_string), new).into()
}

#[test]
fn continue_appends_after_missing_newline() -> anyhow::Result<()> {
    let sources = source_set([plain_text("/a/b.txt", "hello")]);
    let result = RecipeRunner::default().run(
        runnable([append("/a/b.txt", "world", ExistingFileStrategy::Continue)]),
        sources,
    )?;

    assert_eq!(text_at(result.sources(), "/a/b.txt"), Some("hello\nworld\n"));
    assert_eq!(result.generated().count(), 0);
    assert_eq!(result.changes().len(), 1);
    Ok(())
}

#[test]
fn replace_writes_preamble_and_content() -> anyhow::Result<()> {
    let recipe = AppendToTextFile::new(path("notes.txt"), "new")
        .with_preamble("# gen #")
        .with_strategy(ExistingFileStrategy::Replace);
    let result = RecipeRunner::default().run(
        runnable([recipe.into()]),
        source_set([plain_text("notes.txt", "old stuff")]),
    )?;

    assert_eq!(text_at(result.sources(), "notes.txt"), Some("# gen #\nnew\n"));
    let change = result.change_at(&path("notes.txt")).unwrap();
    let before = change.before.as_ref().and_then(SourceFile::as_plain_text);
    assert_eq!(before.map(PlainText::text), Some("old stuff"));
    Ok(())
}

#[test]
fn generated_file_is_not_transformed_in_its_own_cycle() -> anyhow::Result<()> {
    let result = RecipeRunner::default().run(
        runnable([append("CHANGELOG.md", "- entry", ExistingFileStrategy::Continue)]),
        source_set([plain_text("README.md", "readme")]),
    )?;

    assert_eq!(text_at(result.sources(), "CHANGELOG.md"), Some("- entry\n"));
    let generated: Vec<_> = result.generated().map(|f| f.source_path().clone()).collect();
    assert_eq!(generated, vec![path("CHANGELOG.md")]);
    assert!(result.change_at(&path("README.md")).is_none());
    Ok(())
}

#[test]
fn second_recipe_sees_first_recipes_generated_file() -> anyhow::Result<()> {
    let result = RecipeRunner::default().run(
        runnable([
            append("notes.txt", "first", ExistingFileStrategy::Continue),
            append("notes.txt", "second", ExistingFileStrategy::Continue),
        ]),
        SourceSet::new(),
    )?;

    assert_eq!(result.generated().count(), 1);
    assert_eq!(text_at(result.sources(), "notes.txt"), Some("first\n"));
    Ok(())
}

#[test]
fn markup_at_target_path_is_left_alone() -> anyhow::Result<()> {
    let result = RecipeRunner::default().run(
        runnable([append("notes.txt", "x", ExistingFileStrategy::Replace)]),
        source_set([beans_document("notes.txt", [bean("a", "x.A")])]),
    )?;

    assert!(result.is_unchanged());
    Ok(())
}

#[test]
fn attribute_rewrite_follows_prefix_guard() -> anyhow::Result<()> {
    let sources = source_set([beans_document(
        "context.xml",
        [bean("a", "ababy"), bean("b", "xaby"), bean("c", "ab")],
    )]);
    let result = RecipeRunner::default().run(runnable([change_class(Some("ab"), "N")]), sources)?;

    assert_eq!(
        bean_classes(result.sources(), "context.xml"),
        vec!["Naby", "xaby", "N"]
    );
    assert!(!result.changes()[0].is_new());
    Ok(())
}

#[test]
fn unchanged_markup_is_not_reported() -> anyhow::Result<()> {
    let sources = source_set([beans_document("context.xml", [bean("a", "com.A")])]);
    let result =
        RecipeRunner::default().run(runnable([change_class(Some("org."), "net.")]), sources)?;

    assert!(result.is_unchanged());
    Ok(())
}

#[test]
fn rewrite_settles_after_one_extra_cycle() -> anyhow::Result<()> {
    let sources = source_set([beans_document("context.xml", [bean("a", "org.old.A")])]);
    let result = RecipeRunner::new(5).run(
        runnable([change_class(Some("org.old."), "org.new.")]),
        sources,
    )?;

    assert_eq!(result.cycles_run(), 2);
    assert_eq!(bean_classes(result.sources(), "context.xml"), vec!["org.new.A"]);
    Ok(())
}

#[test]
fn append_refuses_more_than_one_cycle() {
    let result = RecipeRunner::new(2).run(
        runnable([
            change_class(None, "x"),
            append("a.txt", "x", ExistingFileStrategy::Continue),
        ]),
        source_set([plain_text("a.txt", "keep")]),
    );

    match result {
        Err(RunError::CycleLimitExceeded { recipe, max, .. }) => {
            assert_eq!(recipe, "append_to_text_file");
            assert_eq!(max, 1);
        }
        other => panic!("expected cycle limit error, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn at_most_one_file_is_generated(present in any::<bool>(), recipes in 1usize..4) {
        let sources = if present {
            source_set([plain_text("target.txt", "seed")])
        } else {
            source_set([plain_text("other.txt", "seed")])
        };
        let specs = (0..recipes)
            .map(|i| append("target.txt", &i.to_string(), ExistingFileStrategy::Leave));
        let result = RecipeRunner::default().run(runnable(specs), sources).unwrap();

        let expected = usize::from(!present);
        prop_assert_eq!(result.generated().count(), expected);
        prop_assert!(result.sources().contains(&path("target.txt")));
    }
}
