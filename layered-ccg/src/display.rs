use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::Parse;

/// Renders a parse as aligned columns (words, categories, and tags when
/// present) followed by one line per dependency.
pub struct ParseDisplay<'a> {
    parse: &'a Parse,
}

impl<'a> ParseDisplay<'a> {
    pub fn new(parse: &'a Parse) -> Self {
        ParseDisplay { parse }
    }
}

const COLUMN_GAP: &str = "  ";

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[&str], widths: &[usize]) -> fmt::Result {
    let mut row = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            row.push_str(COLUMN_GAP);
        }
        row.push_str(cell);
        row.push_str(&" ".repeat(width.saturating_sub(UnicodeWidthStr::width(*cell))));
    }
    writeln!(f, "{}", row.trim_end())
}

impl<'a> fmt::Display for ParseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parse = self.parse;
        let categories: Vec<String> = parse.categories().iter().map(|c| c.to_string()).collect();
        let tags: Option<Vec<&str>> = (0..parse.len())
            .map(|i| parse.pos_tag(i))
            .collect::<Option<Vec<_>>>()
            .filter(|tags| !tags.is_empty());

        let widths: Vec<usize> = (0..parse.len())
            .map(|i| {
                let word = UnicodeWidthStr::width(parse.words()[i].as_str());
                let category = UnicodeWidthStr::width(categories[i].as_str());
                let tag = tags
                    .as_ref()
                    .map(|tags| UnicodeWidthStr::width(tags[i]))
                    .unwrap_or(0);
                word.max(category).max(tag)
            })
            .collect();

        let words: Vec<&str> = parse.words().iter().map(String::as_str).collect();
        write_row(f, &words, &widths)?;
        let categories: Vec<&str> = categories.iter().map(String::as_str).collect();
        write_row(f, &categories, &widths)?;
        if let Some(tags) = &tags {
            write_row(f, tags, &widths)?;
        }

        for dependency in parse.dependencies() {
            write!(
                f,
                "\n{} -{}-> {}",
                parse.words()[dependency.head],
                dependency.arg_number,
                parse.words()[dependency.argument]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let parse = Parse::from_ron_str(
            r#"(
                words: ["She", "ate", "the", "apple"],
                categories: ["NP", "(S[dcl]\\NP)/NP", "NP[nb]/N", "N"],
                dependencies: [(1, 1, 0), (1, 2, 3), (2, 1, 3)],
            )"#,
        )
        .unwrap();

        insta::assert_snapshot!(ParseDisplay::new(&parse), @r###"
        She  ate             the       apple
        NP   (S[dcl]\NP)/NP  NP[nb]/N  N

        ate -1-> She
        ate -2-> apple
        the -1-> apple
        "###);
    }

    #[test]
    fn test_display_pads_by_display_width() {
        let parse = Parse::from_ron_str(
            r#"(words: ["東京", "x"], categories: ["N", "N"], pos_tags: Some(["NNP", "NN"]))"#,
        )
        .unwrap();
        let rendered = ParseDisplay::new(&parse).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["東京  x", "N     N", "NNP   NN"]);
    }
}
