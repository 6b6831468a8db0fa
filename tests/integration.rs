//! Integration tests for the Headcase converter.

use headcase::{Dictionary, ProperNouns, convert_document, unknown_heading_words};

/// Test a complete document: headings converted, code blocks untouched.
#[test]
fn test_complete_document() {
    let input = r#"# TEST HEADING WITH CODE BLOCKS

## PYTHON DEVELOPMENT GUIDE

Here's some Python code:

```python
# This comment should be ignored
def hello_world():
    # Another comment to ignore
    return "Hello"  # Inline comment
```

### JAVASCRIPT FUNCTIONS

Indented code block:

    # This should also be ignored
    var x = 10;  // JavaScript comment
    // Another comment to ignore
    console.log(x);

## API ENDPOINTS DOCUMENTATION

More content here.

```bash
# Shell script comments should be ignored
echo "Hello World"  # This comment too
```

### DATABASE SCHEMA OVERVIEW

Final section.
"#;

    let nouns = ProperNouns::default();
    let result = convert_document(input, &nouns);

    // Headings converted; without a proper-noun entry, "Javascript" stays as
    // capitalized first word and "API" is lowercased like any other word.
    assert!(result.contains("# Test heading with code blocks"));
    assert!(result.contains("## Python development guide"));
    assert!(result.contains("### Javascript functions"));
    assert!(result.contains("## Api endpoints documentation"));
    assert!(result.contains("### Database schema overview"));

    // Comments inside fenced and indented code are preserved verbatim.
    assert!(result.contains("# This comment should be ignored"));
    assert!(result.contains("# Another comment to ignore"));
    assert!(result.contains("# This should also be ignored"));
    assert!(result.contains("# Shell script comments should be ignored"));
    assert!(result.contains("    var x = 10;  // JavaScript comment"));
}

/// Test that TOML frontmatter title fields are converted to sentence case
/// while every other line survives byte for byte.
#[test]
fn test_frontmatter_conversion() {
    let nouns = ProperNouns::from_lines("Chef Habitat\n");
    let input = r#"+++
title = "Chef Habitat and Containers"
description = "Chef Habitat and Containers"
linkTitle = "Containers"
list_pages = true

[menu.containers]
    title = "Chef Habitat and Containers"
    identifier = "containers/containers"
    parent = "containers"
    weight = 10

+++

## GETTING STARTED WITH CHEF HABITAT

This is some content.
"#;
    let expected = r#"+++
title = "Chef Habitat and containers"
description = "Chef Habitat and containers"
linkTitle = "Containers"
list_pages = true

[menu.containers]
    title = "Chef Habitat and containers"
    identifier = "containers/containers"
    parent = "containers"
    weight = 10

+++

## Getting started with Chef Habitat

This is some content.
"#;

    assert_eq!(convert_document(input, &nouns), expected);
}

/// Test frontmatter conversion with multiple proper nouns.
#[test]
fn test_frontmatter_with_multiple_proper_nouns() {
    let nouns = ProperNouns::from_lines("PostgreSQL\nNode.js\nAPI\n");
    let input = r#"+++
title = "DEPLOYING NODE.JS WITH POSTGRESQL AND API"
description = "GUIDE TO DEPLOYMENT"
+++

## DEPLOYMENT STEPS
"#;

    let result = convert_document(input, &nouns);
    assert!(result.contains(r#"title = "Deploying Node.js with PostgreSQL and API""#));
    assert!(result.contains(r#"description = "Guide to deployment""#));
    assert!(result.contains("## Deployment steps"));
}

/// Test that nested menu titles are converted but other section keys are not.
#[test]
fn test_nested_menu_titles() {
    let nouns = ProperNouns::from_lines("Chef\nHabitat\nDocker\nContainers\n");
    let input = r#"+++
title = "Main Title Here"

[menu.containers]
  parent = "habitat"
  weight = 10
  title = "Chef Habitat And Containers"

[menu.other]
  title = "Another Menu Title Here"
  weight = 20
+++

## SOME HEADING
"#;

    let result = convert_document(input, &nouns);
    assert!(result.contains(r#"title = "Main title here""#));
    assert!(result.contains(r#"  title = "Chef Habitat and Containers""#));
    assert!(result.contains(r#"  title = "Another menu title here""#));
    assert!(result.contains(r#"  parent = "habitat""#));
    assert!(result.contains("weight = 10"));
    assert!(result.contains("## Some heading"));
}

/// Test that YAML frontmatter is not processed; only the TOML variant is.
#[test]
fn test_yaml_frontmatter_ignored() {
    let nouns = ProperNouns::default();
    let input = r#"---
title: "CHEF HABITAT AND CONTAINERS"
---

## GETTING STARTED
"#;

    let result = convert_document(input, &nouns);
    assert!(result.contains(r#"title: "CHEF HABITAT AND CONTAINERS""#));
    assert!(result.contains("## Getting started"));
}

/// Test that documents without frontmatter convert normally.
#[test]
fn test_no_frontmatter() {
    let nouns = ProperNouns::default();
    let input = "## GETTING STARTED\n\nThis is content without frontmatter.\n";
    let result = convert_document(input, &nouns);
    assert!(result.contains("## Getting started"));
    assert!(result.contains("This is content without frontmatter."));
}

/// Test that conversion is idempotent (converting twice produces same result).
#[test]
fn test_idempotent_conversion() {
    let nouns = ProperNouns::from_lines("VS Code\nJavaScript\nmacOS\n");
    let input = r#"+++
title = "SETTING UP VS CODE ON MACOS"
+++

# GETTING STARTED WITH JAVASCRIPT

```js
# not a heading
```

## CONFIGURING THE EDITOR
"#;

    let first_pass = convert_document(input, &nouns);
    let second_pass = convert_document(&first_pass, &nouns);
    assert_eq!(first_pass, second_pass, "Conversion should be idempotent");
}

/// Test that an already sentence-case document comes back unchanged, so
/// callers can skip the write entirely.
#[test]
fn test_unchanged_document_identity() {
    let nouns = ProperNouns::from_lines("JavaScript\n");
    let input = "# Getting started with JavaScript\n\nBody text.\n";
    assert_eq!(convert_document(input, &nouns), input);
}

/// Test that CRLF line endings are preserved.
#[test]
fn test_crlf_preserved() {
    let nouns = ProperNouns::default();
    let input = "+++\r\ntitle = \"FIRST STEPS\"\r\n+++\r\n\r\n# NEXT STEPS\r\nBody.\r\n";
    let expected = "+++\r\ntitle = \"First steps\"\r\n+++\r\n\r\n# Next steps\r\nBody.\r\n";
    assert_eq!(convert_document(input, &nouns), expected);
}

/// Test loading proper nouns from a file and converting with them.
#[test]
fn test_nouns_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let nouns_path = dir.path().join("proper_nouns.txt");
    std::fs::write(&nouns_path, "# comment line\nKubernetes\nVS Code\n\n").unwrap();

    let nouns = ProperNouns::from_file(&nouns_path).unwrap();
    assert_eq!(nouns.len(), 2);

    let result = convert_document("# DEPLOYING KUBERNETES FROM VS CODE\n", &nouns);
    assert_eq!(result, "# Deploying Kubernetes from VS Code\n");
}

/// Test the extraction pipeline: dictionary from a file, words from headings
/// only, reported in document order.
#[test]
fn test_extract_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let dict_path = dir.path().join("en_words.txt");
    std::fs::write(
        &dict_path,
        "the\nand\nwith\ndevelopment\nguide\nfunctions\ndocumentation\noverview\ncode\nblocks\nhere\ncontent\nfinal\nsection\nmore\n",
    )
    .unwrap();
    let dictionary = Dictionary::from_file(&dict_path).unwrap();

    let input = r#"# TEST HEADING WITH CODE BLOCKS

```python
# This comment should be ignored
```

### JAVASCRIPT FUNCTIONS

    # This should also be ignored
    console.log(x);

## API ENDPOINTS DOCUMENTATION

### DATABASE SCHEMA OVERVIEW
"#;

    let found = unknown_heading_words(input, &dictionary);
    let words: Vec<&str> = found.iter().map(|u| u.word.as_str()).collect();
    assert_eq!(
        words,
        vec![
            "TEST",
            "HEADING",
            "JAVASCRIPT",
            "API",
            "ENDPOINTS",
            "DATABASE",
            "SCHEMA",
        ]
    );
    assert_eq!(found[0].heading, "# TEST HEADING WITH CODE BLOCKS");
}
