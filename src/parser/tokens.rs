//! Token types produced by the lexer.

use std::fmt;

/// Reserved words of the DDL vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Create,
    Replace,
    Insert,
    To,
    Into,
    Values,
    Alter,
    Table,
    Column,
    Index,
    Unique,
    Constraint,
    References,
    Bytea,
    Blob,
    Clob,
    Char,
    Varchar,
    Varchar2,
    Number,
    Numeric,
    Smallint,
    Integer,
    Bigint,
    Float,
    Text,
    Date,
    Timestamp,
    Timestamptz,
    Not,
    Null,
    On,
    Default,
    Sequence,
    Synonym,
    Start,
    With,
    Primary,
    Foreign,
    Check,
    Key,
    Delete,
    Cascade,
    Set,
    CurrentTimestamp,
    CurrentDate,
    Sysdate,
    And,
    Or,
    Between,
    In,
    Is,
    Enable,
    Disable,
    Row,
    Movement,
    Tablespace,
    Logging,
    Nologging,
    Parallel,
    Noparallel,
    Using,
    Comment,
    Add,
    Drop,
    For,
    Global,
    Temporary,
    Commit,
    Preserve,
    Rows,
    Order,
    Rename,
    Modify,
    Deferrable,
}

const KEYWORDS: &[(&str, Keyword)] = &[
    ("CREATE", Keyword::Create),
    ("REPLACE", Keyword::Replace),
    ("INSERT", Keyword::Insert),
    ("TO", Keyword::To),
    ("INTO", Keyword::Into),
    ("VALUES", Keyword::Values),
    ("ALTER", Keyword::Alter),
    ("TABLE", Keyword::Table),
    ("COLUMN", Keyword::Column),
    ("INDEX", Keyword::Index),
    ("UNIQUE", Keyword::Unique),
    ("CONSTRAINT", Keyword::Constraint),
    ("REFERENCES", Keyword::References),
    ("BYTEA", Keyword::Bytea),
    ("BLOB", Keyword::Blob),
    ("CLOB", Keyword::Clob),
    ("CHAR", Keyword::Char),
    ("VARCHAR", Keyword::Varchar),
    ("VARCHAR2", Keyword::Varchar2),
    ("NUMBER", Keyword::Number),
    ("NUMERIC", Keyword::Numeric),
    ("SMALLINT", Keyword::Smallint),
    ("INTEGER", Keyword::Integer),
    ("BIGINT", Keyword::Bigint),
    ("FLOAT", Keyword::Float),
    ("TEXT", Keyword::Text),
    ("DATE", Keyword::Date),
    ("TIMESTAMP", Keyword::Timestamp),
    ("TIMESTAMPTZ", Keyword::Timestamptz),
    ("NOT", Keyword::Not),
    ("NULL", Keyword::Null),
    ("ON", Keyword::On),
    ("DEFAULT", Keyword::Default),
    ("SEQUENCE", Keyword::Sequence),
    ("SYNONYM", Keyword::Synonym),
    ("START", Keyword::Start),
    ("WITH", Keyword::With),
    ("PRIMARY", Keyword::Primary),
    ("FOREIGN", Keyword::Foreign),
    ("CHECK", Keyword::Check),
    ("KEY", Keyword::Key),
    ("DELETE", Keyword::Delete),
    ("CASCADE", Keyword::Cascade),
    ("SET", Keyword::Set),
    ("CURRENT_TIMESTAMP", Keyword::CurrentTimestamp),
    ("CURRENT_DATE", Keyword::CurrentDate),
    ("SYSDATE", Keyword::Sysdate),
    ("AND", Keyword::And),
    ("OR", Keyword::Or),
    ("BETWEEN", Keyword::Between),
    ("IN", Keyword::In),
    ("IS", Keyword::Is),
    ("ENABLE", Keyword::Enable),
    ("DISABLE", Keyword::Disable),
    ("ROW", Keyword::Row),
    ("MOVEMENT", Keyword::Movement),
    ("TABLESPACE", Keyword::Tablespace),
    ("LOGGING", Keyword::Logging),
    ("NOLOGGING", Keyword::Nologging),
    ("PARALLEL", Keyword::Parallel),
    ("NOPARALLEL", Keyword::Noparallel),
    ("USING", Keyword::Using),
    ("COMMENT", Keyword::Comment),
    ("ADD", Keyword::Add),
    ("DROP", Keyword::Drop),
    ("FOR", Keyword::For),
    ("GLOBAL", Keyword::Global),
    ("TEMPORARY", Keyword::Temporary),
    ("COMMIT", Keyword::Commit),
    ("PRESERVE", Keyword::Preserve),
    ("ROWS", Keyword::Rows),
    ("ORDER", Keyword::Order),
    ("RENAME", Keyword::Rename),
    ("MODIFY", Keyword::Modify),
    ("DEFERRABLE", Keyword::Deferrable),
];

impl Keyword {
    /// Case-insensitive keyword lookup.
    pub fn lookup(word: &str) -> Option<Keyword> {
        KEYWORDS
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(word))
            .map(|(_, kw)| *kw)
    }

    pub fn as_str(&self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, kw)| kw == self)
            .map(|(k, _)| *k)
            .unwrap_or("?")
    }

    /// Column type keywords.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Keyword::Char
                | Keyword::Varchar
                | Keyword::Varchar2
                | Keyword::Number
                | Keyword::Numeric
                | Keyword::Smallint
                | Keyword::Integer
                | Keyword::Bigint
                | Keyword::Float
                | Keyword::Date
                | Keyword::Timestamp
                | Keyword::Timestamptz
                | Keyword::Bytea
                | Keyword::Blob
                | Keyword::Clob
                | Keyword::Text
        )
    }

    /// Keywords that also serve as ordinary names (`date`, `order`, `key`...).
    ///
    /// The reserved remainder are the words that carry meaning inside
    /// expressions or introduce a named constraint.
    pub fn is_soft(&self) -> bool {
        !matches!(
            self,
            Keyword::Constraint
                | Keyword::Check
                | Keyword::And
                | Keyword::Or
                | Keyword::Between
                | Keyword::In
                | Keyword::Is
                | Keyword::Not
                | Keyword::Null
                | Keyword::Sysdate
                | Keyword::CurrentTimestamp
                | Keyword::CurrentDate
        )
    }

    /// Date keywords usable as values.
    pub fn is_date_value(&self) -> bool {
        matches!(
            self,
            Keyword::Sysdate | Keyword::CurrentTimestamp | Keyword::CurrentDate
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    SQuoted,
    DQuoted,
    Include,
    Macro,
    Identifier,
    Keyword(Keyword),
    Digits,
    Eq,
    Neq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Plus,
    Minus,
    LParen,
    RParen,
    Comma,
    Semicolon,
}

impl TokenKind {
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::Neq
                | TokenKind::Gt
                | TokenKind::GtEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Plus
                | TokenKind::Minus
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::SQuoted => "SQUOTED",
            TokenKind::DQuoted => "DQUOTED",
            TokenKind::Include => "INCLUDE",
            TokenKind::Macro => "MACRO",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::Digits => "DIGITS",
            TokenKind::Eq => "EQ",
            TokenKind::Neq => "NEQ",
            TokenKind::Gt => "GT",
            TokenKind::GtEq => "GTEQ",
            TokenKind::Lt => "LT",
            TokenKind::LtEq => "LTEQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
        };
        f.write_str(name)
    }
}

/// A lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text, original case preserved. Includes keep only the path.
    pub value: String,
    /// 1-based source line.
    pub line: usize,
    /// Byte offset of the token in the source.
    pub offset: usize,
}

impl Token {
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn is(&self, kw: Keyword) -> bool {
        self.kind == TokenKind::Keyword(kw)
    }

    /// An identifier, or a keyword usable as one.
    pub fn is_name(&self) -> bool {
        match self.kind {
            TokenKind::Identifier => true,
            TokenKind::Keyword(kw) => kw.is_soft(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_is_case_insensitive() {
        assert_eq!(Keyword::lookup("varchar2"), Some(Keyword::Varchar2));
        assert_eq!(Keyword::lookup("Current_Timestamp"), Some(Keyword::CurrentTimestamp));
        assert_eq!(Keyword::lookup("accounts"), None);
    }

    #[test]
    fn test_keyword_names_round_trip() {
        for (name, kw) in KEYWORDS {
            assert_eq!(kw.as_str(), *name);
        }
    }

    #[test]
    fn test_soft_keywords() {
        assert!(Keyword::Date.is_soft());
        assert!(Keyword::Order.is_soft());
        assert!(!Keyword::Constraint.is_soft());
        assert!(!Keyword::And.is_soft());
    }
}
