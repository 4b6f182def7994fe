//! Statements and blocks of a parsed query buffer.

use crate::query::token::Token;

/// The recognized statement kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `select` - the concept/predicate chain being queried.
    Select,
    /// `from` - which reasoner answers the chain.
    From,
    /// `where` - constraints on the chain.
    Where,
}

impl StatementKind {
    /// Parse a statement keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "select" => Some(Self::Select),
            "from" => Some(Self::From),
            "where" => Some(Self::Where),
            _ => None,
        }
    }

    /// The keyword naming this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::From => "from",
            Self::Where => "where",
        }
    }
}

/// One statement: the kind keyword followed by its tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statement {
    tokens: Vec<Token>,
}

impl Statement {
    /// Build a statement from its tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// All tokens, keyword included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the statement has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The statement keyword, if the first token is a leaf.
    pub fn keyword(&self) -> Option<&str> {
        self.tokens.first().and_then(Token::leaf_text)
    }

    /// The statement kind, if the keyword is recognized.
    pub fn kind(&self) -> Option<StatementKind> {
        self.keyword().and_then(StatementKind::from_keyword)
    }

    /// Token counted from the end: `from_end(1)` is the last token.
    pub fn from_end(&self, n: usize) -> Option<&Token> {
        self.len().checked_sub(n).and_then(|i| self.tokens.get(i))
    }

    /// A copy with linebreak leaves removed.
    ///
    /// The parser emits linebreaks as their own leaf tokens; they carry no
    /// grammatical meaning and are stripped before classification.
    pub fn without_linebreaks(&self) -> Statement {
        Statement {
            tokens: self
                .tokens
                .iter()
                .filter(|t| !t.is_linebreak())
                .cloned()
                .collect(),
        }
    }

    /// Tokens after the keyword, with whitespace leaves removed.
    ///
    /// This is the concept/predicate chain a `from` statement replays.
    pub fn chain(&self) -> Vec<&Token> {
        self.tokens
            .iter()
            .skip(1)
            .filter(|t| !t.is_whitespace() && !t.is_linebreak())
            .collect()
    }
}

/// All statements parsed from one editor buffer.
///
/// By grammar convention a block holds exactly one `select` statement and
/// it comes first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    statements: Vec<Statement>,
}

impl Block {
    /// Build a block from its statements.
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// All statements in order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// True if the block has no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The statement the cursor is in (always the last one of the
    /// incomplete block).
    pub fn last_statement(&self) -> Option<&Statement> {
        self.statements.last()
    }

    /// The first `select` statement, if any.
    pub fn select_statement(&self) -> Option<&Statement> {
        self.statements
            .iter()
            .find(|s| s.kind() == Some(StatementKind::Select))
    }

    /// A copy with linebreak leaves stripped from every statement.
    pub fn without_linebreaks(&self) -> Block {
        Block {
            statements: self
                .statements
                .iter()
                .map(Statement::without_linebreaks)
                .collect(),
        }
    }
}

/// The incomplete/complete block pair produced by one parser call.
///
/// The incomplete block reflects the text truncated at the cursor, the
/// complete block the entire buffer. The last statement of each aligns
/// positionally, which is what lets the resolver look ahead past the
/// cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePair {
    /// Block parsed from the text up to the cursor.
    pub incomplete: Block,
    /// Block parsed from the whole buffer.
    pub complete: Block,
}
