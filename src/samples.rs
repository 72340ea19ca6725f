//! Initial editor contents shown on startup.

/// Sample document covering headings, emphasis, lists, a code fence, a
/// blockquote and a link.
pub const SAMPLE_MARKDOWN: &str = r#"# Welcome to Markpress

This is a **powerful** tool that converts your *Markdown* content to PDF with custom styling.

## Features

- Real-time preview
- Custom CSS support
- Professional styling
- PDF generation

### Code Example

```javascript
function greet(name) {
  return `Hello, ${name}!`;
}
```

### List Example

1. First item
2. Second item
3. Third item

- Bullet point one
- Bullet point two
- Bullet point three

> This is a blockquote with important information.

[Learn more about Markdown](https://www.markdownguide.org/)
"#;

/// Sample user stylesheet for the semantic classes.
pub const SAMPLE_CSS: &str = r#"/* Add your custom CSS here */
.markdown-body {
  font-family: 'Georgia', serif;
}

.markdown-header {
  color: #2563eb;
  border-bottom: 2px solid #e5e7eb;
}

.markdown-paragraph {
  line-height: 1.8;
}
"#;
