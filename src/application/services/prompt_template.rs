pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

const SOURCE_TEXT_PLACEHOLDER: &str = "{text}";

const MIND_MAP_PROMPT_TEMPLATE: &str = r#"
Goal:
* Reorganize the document below into a structured outline that is clear and easy to read.
* Express the outline in markmap syntax so it can be drawn as a mind map.
* Keep the original wording wherever possible. Do not add explanations or rewrite sentences.
* Do not leave out any detail that appears in the source.

Rules:
1. Analyse the text and identify its logical structure and hierarchy.
2. The mind map must show each part of the document and how the parts relate.
3. Follow markmap syntax strictly.
4. Output only the markmap markdown.
5. Never shorten, merge away or alter the source content.
6. A markmap example:
"---
title: markmap
---

## Links

- [Website](https://markmap.js.org/)
- [GitHub](https://github.com/gera2ld/markmap)

## Related Projects

- [coc-markmap](https://github.com/gera2ld/coc-markmap) for Neovim
- [markmap-vscode](https://marketplace.visualstudio.com/items?itemName=gera2ld.markmap-vscode) for VSCode
- [eaf-markmap](https://github.com/emacs-eaf/eaf-markmap) for Emacs

## Features

Note that if blocks and lists appear at the same level, the lists will be ignored.

### Lists

- **strong** ~~del~~ *italic* ==highlight==
- `inline code`
- [x] checkbox
- Katex: $x = {-b \pm \sqrt{b^2-4ac} \over 2a}$ <!-- markmap: fold -->
  - [More Katex Examples](#?d=gist:af76a4c245b302206b16aec503dbe07b:katex.md)
- Now we can wrap very very very very long text based on `maxWidth` option
- Ordered list
  1. item 1
  2. item 2

### Blocks

```js
console.log('hello, JavaScript')
```

| Products | Price |
|-|-|
| Apple | 4 |
| Banana | 2 |

![](https://markmap.js.org/favicon.png)"

Tone:
* Present the result clearly and concisely.
* Avoid subjective or speculative language.

The text to organize:

{text}
"#;

/// Wraps the source text in the fixed mind-map instructions.
pub fn build_mind_map_prompt(text: &str) -> String {
    MIND_MAP_PROMPT_TEMPLATE.replacen(SOURCE_TEXT_PLACEHOLDER, text, 1)
}
