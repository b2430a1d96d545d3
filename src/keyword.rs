macro_rules! get_keyword_name_impl {
    ($f_name:ident; $lex_type:ty; $lex_enum:ident; $($lexname:literal,$lexcode:ident),+) => {
        pub fn $f_name(self) -> $lex_type {
            match self {
                $($lex_enum::$lexcode => $lexname,)+
            }
        }
    };
}

macro_rules! get_keyword_code_impl {
    ($f_name:ident; $lex_type:ty; $lex_enum:ident; $($lexname:literal,$lexcode:ident),+) => {
        pub fn $f_name(name: $lex_type) -> Option<$lex_enum> {
            match name {
                $($lexname => Some($lex_enum::$lexcode),)+
                _ => None,
            }
        }
    };
}

macro_rules! tokens {
    ($tokens_type:ident; $($lex:ident),+) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $tokens_type {
            $($lex),+
        }
    };
}

macro_rules! implement_lexer {
    ($(|$name:literal, $code:ident, $category:literal|),+) => {
        tokens!(Keyword; $($code),+);

        impl Keyword {
            get_keyword_name_impl!(lexeme; &'static str; Keyword; $($name,$code),+);
            get_keyword_name_impl!(category; &'static str; Keyword; $($category,$code),+);
            get_keyword_code_impl!(lookup; &str; Keyword; $($name,$code),+);
        }
    };
}

implement_lexer!(
    |"BEGIN", Begin, "PROGRAM_BEGIN"|,
    |"END", End, "PROGRAM_END"|,
    |"VARINT", VarInt, "DECLARATION_INT"|,
    |"VARSTR", VarStr, "DECLARATION_STRING"|,
    |"WITH", With, "DECLARATION_ASSIGN_WITH_KEY"|,
    |"INPUT", Input, "INPUT"|,
    |"PRINT", Print, "OUTPUT"|,
    |"PRINTLN", PrintLn, "OUTPUT_WITH_LINE"|,
    |"STORE", Store, "ASSIGN_KEY"|,
    |"IN", In, "ASSIGN_VAR_KEY"|,
    |"ADD", Add, "BASIC_OPERATOR_ADD"|,
    |"SUB", Sub, "BASIC_OPERATOR_SUB"|,
    |"MUL", Mul, "BASIC_OPERATOR_MUL"|,
    |"DIV", Div, "BASIC_OPERATOR_DIV"|,
    |"MOD", Mod, "BASIC_OPERATOR_MOD"|,
    |"RAISE", Raise, "ADVANCED_OPERATOR_EXP"|,
    |"ROOT", Root, "ADVANCED_OPERATOR_ROOT"|,
    |"MEAN", Mean, "ADVANCED_OPERATOR_AVE"|,
    |"DIST", Dist, "ADVANCED_OPERATOR_DIST"|,
    |"AND", And, "DISTANCE_SEPARATOR"|
);

impl Keyword {
    /// Keywords that may appear inside an expression run.
    pub fn is_expression_term(self) -> bool {
        self == Keyword::And || self.is_operator()
    }

    /// Keywords that may open a bare expression statement.
    pub fn is_operator(self) -> bool {
        match self {
            Keyword::Add
            | Keyword::Sub
            | Keyword::Mul
            | Keyword::Div
            | Keyword::Mod
            | Keyword::Raise
            | Keyword::Root
            | Keyword::Mean
            | Keyword::Dist => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(Keyword::lookup("PRINTLN"), Some(Keyword::PrintLn));
        assert_eq!(Keyword::lookup("println"), None);
        assert_eq!(Keyword::lookup("EOS"), None);
        assert_eq!(Keyword::lookup("EOF"), None);
    }

    #[test]
    fn lexeme_and_category_follow_table() {
        assert_eq!(Keyword::Raise.lexeme(), "RAISE");
        assert_eq!(Keyword::Raise.category(), "ADVANCED_OPERATOR_EXP");
        assert_eq!(Keyword::And.category(), "DISTANCE_SEPARATOR");
    }

    #[test]
    fn separator_is_term_but_not_operator() {
        assert!(Keyword::And.is_expression_term());
        assert!(!Keyword::And.is_operator());
        assert!(Keyword::Mean.is_operator());
        assert!(!Keyword::Store.is_expression_term());
    }
}
