use tree_sitter::{Node, Parser};

use super::{ImportParser, ParsedImport, ParserError};

pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ParserError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParserError::InitError(e.to_string()))?;

        Ok(Self { parser })
    }

    fn extract_imports(
        &self,
        source: &str,
        tree: &tree_sitter::Tree,
    ) -> Vec<ParsedImport> {
        let mut imports = Vec::new();
        let root = tree.root_node();

        let mut cursor = root.walk();
        let children: Vec<Node> = root.children(&mut cursor).collect();

        // Comments seen since the last non-comment node; candidates
        // for the next import's doc comment.
        let mut pending: Vec<Node> = Vec::new();

        let mut i = 0;
        while i < children.len() {
            let child = children[i];
            match child.kind() {
                "comment" => pending.push(child),
                "import_declaration" => {
                    i += self.parse_import_declaration(
                        &child,
                        &children[i + 1..],
                        source,
                        &mut pending,
                        &mut imports,
                    );
                    pending.clear();
                }
                _ => pending.clear(),
            }
            i += 1;
        }

        imports
    }

    /// Parse `import "x"` or `import ( ... )`. Returns how many
    /// following siblings were consumed as a trailing comment.
    fn parse_import_declaration(
        &self,
        node: &Node,
        following: &[Node],
        source: &str,
        pending: &mut Vec<Node>,
        imports: &mut Vec<ParsedImport>,
    ) -> usize {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();

        for child in &children {
            match child.kind() {
                "import_spec" => {
                    // Single-line form; the trailing comment, if any,
                    // is a sibling of the whole declaration.
                    let mut imp = self.parse_import_spec(child, source, pending);
                    if let Some(next) = following.first() {
                        if next.kind() == "comment"
                            && next.start_position().row == child.end_position().row
                        {
                            imp.comment = Some(node_text(next, source));
                            imports.push(imp);
                            return 1;
                        }
                    }
                    imports.push(imp);
                }
                "import_spec_list" => {
                    self.parse_import_spec_list(child, source, imports);
                }
                _ => {}
            }
        }

        0
    }

    /// Parse the specs inside `import ( ... )`, attaching doc and
    /// trailing comments found between them.
    fn parse_import_spec_list(&self, node: &Node, source: &str, imports: &mut Vec<ParsedImport>) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();

        let mut pending: Vec<Node> = Vec::new();
        let mut i = 0;
        while i < children.len() {
            let child = children[i];
            match child.kind() {
                "comment" => pending.push(child),
                "import_spec" => {
                    let mut imp = self.parse_import_spec(&child, source, &mut pending);
                    // A comment starting on the spec's last line is a
                    // trailing comment, not the next spec's doc.
                    if let Some(next) = children.get(i + 1) {
                        if next.kind() == "comment"
                            && next.start_position().row == child.end_position().row
                        {
                            imp.comment = Some(node_text(next, source));
                            i += 1;
                        }
                    }
                    imports.push(imp);
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// Parse one `[name] "path"` spec, taking its doc comment from
    /// the pending comments that end directly above it.
    fn parse_import_spec(
        &self,
        node: &Node,
        source: &str,
        pending: &mut Vec<Node>,
    ) -> ParsedImport {
        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(&n, source));
        let path = node
            .child_by_field_name("path")
            .map(|n| node_text(&n, source))
            .unwrap_or_default();

        let start_row = node.start_position().row;
        let (doc, doc_line) = take_doc_comments(pending, start_row, source);

        ParsedImport {
            name,
            path,
            doc,
            comment: None,
            start_line: start_row + 1,
            end_line: node.end_position().row + 1,
            doc_line,
        }
    }
}

/// Drain the suffix of `pending` that forms a contiguous run of
/// comment lines ending directly above `spec_row`. Detached comments
/// (a blank line between them and the import) are discarded. Returns
/// the doc lines and the 1-indexed line the doc starts on.
fn take_doc_comments(
    pending: &mut Vec<Node>,
    spec_row: usize,
    source: &str,
) -> (Vec<String>, Option<usize>) {
    let mut start = pending.len();
    let mut expected_end = spec_row;
    while start > 0 {
        let comment = &pending[start - 1];
        if comment.end_position().row + 1 == expected_end {
            expected_end = comment.start_position().row;
            start -= 1;
        } else {
            break;
        }
    }
    let doc_line = pending
        .get(start)
        .map(|c| c.start_position().row + 1);
    let doc = pending[start..]
        .iter()
        .map(|c| node_text(c, source))
        .collect();
    pending.clear();
    (doc, doc_line)
}

fn node_text(node: &Node, source: &str) -> String {
    source[node.byte_range()].to_string()
}

impl ImportParser for GoParser {
    fn parse(&mut self, source: &str) -> Result<Vec<ParsedImport>, ParserError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParserError::ParseError("parser produced no tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(&root).unwrap_or(1);
            return Err(ParserError::SyntaxError { line });
        }

        Ok(self.extract_imports(source, &tree))
    }
}

fn first_error_line(node: &Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(line) = first_error_line(&child) {
                return Some(line);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_import() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse("package main\n\nimport \"fmt\"\n")
            .unwrap();

        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].path, "\"fmt\"");
        assert_eq!(imports[0].name, None);
        assert_eq!(imports[0].start_line, 3);
        assert_eq!(imports[0].end_line, 3);
    }

    #[test]
    fn test_import_block() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse("package main\n\nimport (\n\t\"fmt\"\n\t\"strings\"\n)\n")
            .unwrap();

        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].path, "\"fmt\"");
        assert_eq!(imports[0].start_line, 4);
        assert_eq!(imports[1].path, "\"strings\"");
        assert_eq!(imports[1].start_line, 5);
    }

    #[test]
    fn test_aliased_imports() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse(
                "package main\n\nimport (\n\tmyfmt \"fmt\"\n\t. \"math\"\n\t_ \"net/http/pprof\"\n)\n",
            )
            .unwrap();

        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].name.as_deref(), Some("myfmt"));
        assert_eq!(imports[1].name.as_deref(), Some("."));
        assert_eq!(imports[2].name.as_deref(), Some("_"));
    }

    #[test]
    fn test_doc_comment_attaches_to_import() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse(
                "package main\n\nimport (\n\t// docs for fmt\n\t// second line\n\t\"fmt\"\n\t\"strings\"\n)\n",
            )
            .unwrap();

        assert_eq!(imports.len(), 2);
        assert_eq!(
            imports[0].doc,
            vec!["// docs for fmt".to_string(), "// second line".to_string()]
        );
        assert_eq!(imports[0].doc_line, Some(4));
        assert!(imports[1].doc.is_empty());
        assert_eq!(imports[1].doc_line, None);
    }

    #[test]
    fn test_detached_comment_is_not_doc() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse("package main\n\nimport (\n\t// floating\n\n\t\"fmt\"\n)\n")
            .unwrap();

        assert_eq!(imports.len(), 1);
        assert!(imports[0].doc.is_empty());
        assert_eq!(imports[0].doc_line, None);
    }

    #[test]
    fn test_trailing_comment() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse("package main\n\nimport (\n\t\"fmt\" // formatting\n\t\"strings\"\n)\n")
            .unwrap();

        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].comment.as_deref(), Some("// formatting"));
        assert!(imports[1].doc.is_empty());
        assert_eq!(imports[1].comment, None);
    }

    #[test]
    fn test_trailing_comment_single_form() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse("package main\n\nimport \"fmt\" // only one\n")
            .unwrap();

        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].comment.as_deref(), Some("// only one"));
    }

    #[test]
    fn test_raw_string_path() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse("package main\n\nimport `fmt`\n")
            .unwrap();

        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].path, "`fmt`");
    }

    #[test]
    fn test_line_gap_preserved_in_spans() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser
            .parse("package main\n\nimport (\n\t\"fmt\"\n\n\t\"github.com/foo/bar\"\n)\n")
            .unwrap();

        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].end_line, 4);
        assert_eq!(imports[1].start_line, 6);
    }

    #[test]
    fn test_no_imports() {
        let mut parser = GoParser::new().unwrap();
        let imports = parser.parse("package main\n\nfunc main() {}\n").unwrap();
        assert!(imports.is_empty());
    }

    #[test]
    fn test_syntax_error() {
        let mut parser = GoParser::new().unwrap();
        let result = parser.parse("package main\n\nimport (\n\t\"fmt\"\n");
        assert!(matches!(result, Err(ParserError::SyntaxError { .. })));
    }
}
