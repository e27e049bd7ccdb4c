//! Recursive-descent parser for the compact type grammar.

use super::{TypeKind, TypeNode};
use crate::error::GrammarError;

pub(super) fn parse_expression(expr: &str) -> Result<TypeNode, GrammarError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(GrammarError::EmptyExpression);
    }

    let mut parser = Parser {
        expr: trimmed,
        chars: trimmed.char_indices().peekable(),
    };
    let mut node = parser.parse_node()?;
    if parser.chars.peek().is_some() {
        return Err(GrammarError::TrailingInput {
            rest: parser.expr[parser.offset()..].to_string(),
            expr: trimmed.to_string(),
        });
    }
    link_parents(&mut node, None);
    validate(&node)?;
    Ok(node)
}

struct Parser<'a> {
    expr: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(i, _)| *i)
            .unwrap_or(self.expr.len())
    }

    fn parse_node(&mut self) -> Result<TypeNode, GrammarError> {
        let token = self.read_ident();
        if token.is_empty() {
            // Expressions like `list()` land here with the cursor on the
            // delimiter that cut the identifier short.
            return Err(GrammarError::MissingKind {
                rest: self.expr[self.offset()..].to_string(),
                expr: self.expr.to_string(),
            });
        }
        let kind = TypeKind::from_token(&token).ok_or_else(|| GrammarError::UnknownKind {
            token: token.clone(),
            expr: self.expr.to_string(),
        })?;

        let mut children = Vec::new();
        if self.eat('(') {
            loop {
                children.push(self.parse_node()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat(')') {
                    break;
                }
                return Err(GrammarError::UnterminatedGroup {
                    open: '(',
                    expr: self.expr.to_string(),
                });
            }
        }

        let type_name = if self.eat('<') {
            self.read_until('>')?
        } else {
            String::new()
        };
        let name = if self.eat('[') {
            self.read_until(']')?
        } else {
            String::new()
        };

        Ok(TypeNode {
            kind,
            children,
            name,
            type_name,
            parent_kind: None,
        })
    }

    fn read_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some((_, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || *c == '_' {
                ident.push(*c);
                self.chars.next();
            } else {
                break;
            }
        }
        ident
    }

    fn read_until(&mut self, close: char) -> Result<String, GrammarError> {
        let mut content = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == close {
                return Ok(content);
            }
            content.push(c);
        }
        let open = match close {
            '>' => '<',
            ']' => '[',
            _ => close,
        };
        Err(GrammarError::UnterminatedGroup {
            open,
            expr: self.expr.to_string(),
        })
    }

    fn eat(&mut self, expected: char) -> bool {
        if matches!(self.chars.peek(), Some((_, c)) if *c == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }
}

fn link_parents(node: &mut TypeNode, parent: Option<TypeKind>) {
    node.parent_kind = parent;
    let kind = node.kind;
    for child in &mut node.children {
        link_parents(child, Some(kind));
    }
}

fn validate(node: &TypeNode) -> Result<(), GrammarError> {
    match node.kind.arity() {
        Some(expected) if node.children.len() != expected => {
            return Err(GrammarError::ArityMismatch {
                kind: node.kind,
                expected,
                found: node.children.len(),
            });
        }
        None => {
            // Objects take one child per property, each carrying a name.
            if node.children.is_empty() {
                return Err(GrammarError::ArityMismatch {
                    kind: node.kind,
                    expected: 1,
                    found: 0,
                });
            }
            for (index, child) in node.children.iter().enumerate() {
                if child.name.is_empty() {
                    return Err(GrammarError::MissingBindingName {
                        type_name: node.type_name.clone(),
                        index,
                    });
                }
            }
        }
        _ => {}
    }
    for child in &node.children {
        validate(child)?;
    }
    Ok(())
}
