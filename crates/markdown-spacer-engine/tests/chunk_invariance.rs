//! Property tests: chunked formatting matches whole-buffer formatting for
//! every chunk size, and formatting twice changes nothing.

use markdown_spacer_engine::{Chunker, FormatOptions, ResidualState, format_document};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "中文",
    "测试",
    "English",
    "word",
    "123",
    "v1.2.3",
    "v 2.0",
    "10 MB",
    "4GB+",
    "2025年7月24日",
    "12:30",
    "UTF-8",
    "a >= b",
    ">=100GB",
    "A+B",
    "张三-李四",
    "文本/JSON",
    "Hello,world",
    "(test)",
    "UTF - 8",
    "src / core / formatter. py",
    " ",
    "   ",
    "\t",
    "，",
    "。",
    "“引号”",
    "`code 中文A`",
    "$x+1$",
    "[链接link](http://a.com/中文)",
    "<b>",
    "\n",
    "\r\n",
    "\n```\n中文English   x\n```\n",
    "\n~~~~\n```\n中文A\n~~~~\n",
    "\n$$\n中文A  b\n$$\n",
    "\n> 引用quote\n",
    "\n- 列表item\n",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.concat())
}

fn chunked(doc: &str, size: usize, options: FormatOptions) -> String {
    let chunker = Chunker::new(options);
    let mut residual = ResidualState::new();
    let mut out = String::new();
    let bytes = doc.as_bytes();
    let mut start = 0;
    loop {
        let end = (start + size).min(bytes.len());
        let is_final = end == bytes.len();
        let output = chunker
            .feed_bytes(residual, &bytes[start..end], is_final)
            .expect("valid utf-8");
        output.write_to(&mut out);
        residual = output.residual;
        if is_final {
            return out;
        }
        start = end;
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_chunk_invariance(doc in document(), size in 1usize..48, bold in any::<bool>()) {
        let options = FormatOptions { bold_chinese_quotes: bold };
        let whole = format_document(&doc, &options).text;
        prop_assert_eq!(chunked(&doc, size, options), whole);
    }

    #[test]
    fn prop_idempotence(doc in document()) {
        let options = FormatOptions::default();
        let once = format_document(&doc, &options);
        prop_assume!(once.warnings.is_empty());
        let twice = format_document(&once.text, &options);
        prop_assert_eq!(twice.text, once.text);
    }

    #[test]
    fn prop_fence_content_is_opaque(body in "[a-z中文 \t]{0,30}") {
        let doc = format!("前文A\n```\n{body}\n```\n");
        let out = format_document(&doc, &FormatOptions::default()).text;
        prop_assert_eq!(out, format!("前文 A\n```\n{body}\n```\n"));
    }

    #[test]
    fn prop_version_never_split(size in 1usize..24) {
        let doc = "发布v1.2.3版本和2025年7月24日和10MB\n";
        let out = chunked(doc, size, FormatOptions::default());
        prop_assert!(out.contains("v1.2.3"));
        prop_assert!(out.contains("2025年7月24日"));
        prop_assert!(out.contains("10MB"));
    }
}

#[test]
fn every_size_on_a_fixed_document() {
    let doc = "标题Title\r\n\n```js\nlet 中文a;\n```\n版本v 1.2.3，大小10 MB。\n$$\nx\n$$\n末尾end";
    let whole = format_document(doc, &FormatOptions::default()).text;
    for size in 1..=doc.len() {
        assert_eq!(chunked(doc, size, FormatOptions::default()), whole, "size {size}");
    }
}
