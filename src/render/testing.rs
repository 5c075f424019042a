//! Test-only interpreter for the patterns this crate emits.
//!
//! Understands exactly the generated grammar: alternation, `(?:...)`,
//! `(?!...)`, `^`, classes (optionally negated) and the escapes produced by
//! the renderer. Input is a slice of units: UTF-16 code units for ordinary
//! patterns, code points for unicode mode patterns.

use crate::PatternCompiler;

#[derive(Debug, Clone)]
enum Node {
    Unit(u32),
    Class { negated: bool, items: Vec<(u32, u32)> },
    Start,
    Group(Vec<Vec<Node>>),
    NegativeLookahead(Vec<Vec<Node>>),
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Result<char, String> {
        let c = self
            .peek()
            .ok_or_else(|| format!("unexpected end of pattern at {}", self.pos))?;
        self.pos += 1;
        Ok(c)
    }

    fn expect(&mut self, wanted: char) -> Result<(), String> {
        let got = self.next()?;
        if got != wanted {
            return Err(format!("expected {:?}, got {:?} at {}", wanted, got, self.pos - 1));
        }
        Ok(())
    }

    fn hex(&mut self, digits: usize) -> Result<u32, String> {
        let text: String = (0..digits).map(|_| self.next()).collect::<Result<_, _>>()?;
        u32::from_str_radix(&text, 16).map_err(|e| format!("bad hex {:?}: {}", text, e))
    }

    fn escape(&mut self) -> Result<u32, String> {
        Ok(match self.next()? {
            't' => 0x09,
            'n' => 0x0A,
            'f' => 0x0C,
            'r' => 0x0D,
            '0' => 0x00,
            'x' => self.hex(2)?,
            'u' if self.peek() == Some('{') => {
                self.pos += 1;
                let mut text = String::new();
                while self.peek() != Some('}') {
                    text.push(self.next()?);
                }
                self.pos += 1;
                u32::from_str_radix(&text, 16).map_err(|e| format!("bad hex {:?}: {}", text, e))?
            }
            'u' => self.hex(4)?,
            other => other as u32,
        })
    }

    fn unit(&mut self) -> Result<u32, String> {
        match self.next()? {
            '\\' => self.escape(),
            c => Ok(c as u32),
        }
    }

    fn class(&mut self) -> Result<Node, String> {
        self.expect('[')?;
        let negated = self.peek() == Some('^');
        if negated {
            self.pos += 1;
        }
        let mut items = Vec::new();
        while self.peek() != Some(']') {
            let lo = self.unit()?;
            if self.peek() == Some('-') && self.chars.get(self.pos + 1) != Some(&']') {
                self.pos += 1;
                let hi = self.unit()?;
                items.push((lo, hi));
            } else {
                items.push((lo, lo));
            }
        }
        self.pos += 1;
        Ok(Node::Class { negated, items })
    }

    fn alternation(&mut self) -> Result<Vec<Vec<Node>>, String> {
        let mut alts = vec![self.sequence()?];
        while self.peek() == Some('|') {
            self.pos += 1;
            alts.push(self.sequence()?);
        }
        Ok(alts)
    }

    fn sequence(&mut self) -> Result<Vec<Node>, String> {
        let mut seq = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '|' | ')' => break,
                '(' => {
                    self.pos += 1;
                    self.expect('?')?;
                    let kind = self.next()?;
                    let alts = self.alternation()?;
                    self.expect(')')?;
                    seq.push(match kind {
                        ':' => Node::Group(alts),
                        '!' => Node::NegativeLookahead(alts),
                        other => return Err(format!("unsupported group kind {:?}", other)),
                    });
                }
                '[' => seq.push(self.class()?),
                '^' => {
                    self.pos += 1;
                    seq.push(Node::Start);
                }
                _ => seq.push(Node::Unit(self.unit()?)),
            }
        }
        Ok(seq)
    }
}

fn match_alternation(alts: &[Vec<Node>], input: &[u32], pos: usize) -> Vec<usize> {
    alts.iter()
        .flat_map(|seq| match_sequence(seq, input, pos))
        .collect()
}

fn match_sequence(seq: &[Node], input: &[u32], pos: usize) -> Vec<usize> {
    let Some((first, rest)) = seq.split_first() else {
        return vec![pos];
    };
    match_node(first, input, pos)
        .into_iter()
        .flat_map(|next| match_sequence(rest, input, next))
        .collect()
}

fn match_node(node: &Node, input: &[u32], pos: usize) -> Vec<usize> {
    match node {
        Node::Unit(u) => {
            if input.get(pos) == Some(u) {
                vec![pos + 1]
            } else {
                vec![]
            }
        }
        Node::Class { negated, items } => match input.get(pos) {
            Some(&u) if items.iter().any(|&(lo, hi)| lo <= u && u <= hi) != *negated => {
                vec![pos + 1]
            }
            _ => vec![],
        },
        Node::Start => {
            if pos == 0 {
                vec![pos]
            } else {
                vec![]
            }
        }
        Node::Group(alts) => match_alternation(alts, input, pos),
        Node::NegativeLookahead(alts) => {
            if match_alternation(alts, input, pos).is_empty() {
                vec![pos]
            } else {
                vec![]
            }
        }
    }
}

/// A parsed pattern that can be tested against unit sequences.
#[derive(Debug)]
pub(crate) struct TestRegex {
    root: Vec<Vec<Node>>,
    pub(crate) flags: String,
}

impl TestRegex {
    pub(crate) fn parse(pattern: &str, flags: &str) -> Result<Self, String> {
        let mut parser = Parser {
            chars: pattern.chars().collect(),
            pos: 0,
        };
        let root = parser.alternation()?;
        if parser.pos != parser.chars.len() {
            return Err(format!("trailing input at {}", parser.pos));
        }
        Ok(Self {
            root,
            flags: flags.to_string(),
        })
    }

    /// True iff the whole of `input` is one match of the pattern.
    pub(crate) fn is_full_match(&self, input: &[u32]) -> bool {
        match_alternation(&self.root, input, 0).contains(&input.len())
    }
}

/// Compiler handing out `TestRegex` values.
pub(crate) struct TestCompiler;

impl PatternCompiler for TestCompiler {
    type Regex = TestRegex;
    type Error = String;

    fn compile(&self, pattern: &str, flags: &str) -> Result<TestRegex, String> {
        TestRegex::parse(pattern, flags)
    }
}

/// Parse `pattern` and check it matches all of `input`.
pub(crate) fn matches_exactly(pattern: &str, input: &[u32]) -> bool {
    match TestRegex::parse(pattern, "") {
        Ok(regex) => regex.is_full_match(input),
        Err(e) => panic!("generated pattern {:?} does not parse: {}", pattern, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpreter_basics() {
        assert!(matches_exactly("[a-c]", &['b' as u32]));
        assert!(!matches_exactly("[a-c]", &['d' as u32]));
        assert!(!matches_exactly("[]", &['a' as u32]));
        assert!(matches_exactly("a|\\uD83D\\uDE00", &[0xD83D, 0xDE00]));
        assert!(matches_exactly("\\u{1F600}", &[0x1F600]));
        assert!(matches_exactly("\\0", &[0]));
        assert!(matches_exactly("[\\x2D\\\\]", &[0x5C]));
    }

    #[test]
    fn test_interpreter_guards() {
        let high = "\\uD800(?![\\uDC00-\\uDFFF])";
        assert!(matches_exactly(high, &[0xD800]));
        assert!(!matches_exactly(high, &[0xD800, 0xDC00]));

        let low = "(?:[^\\uD800-\\uDBFF]|^)\\uDC00";
        assert!(matches_exactly(low, &[0xDC00]));
        assert!(!matches_exactly(low, &[0xD800, 0xDC00]));
    }
}
