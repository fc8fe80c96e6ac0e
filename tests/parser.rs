#[cfg(test)]
mod parser_tests {
    use sprig_interpreter as sprig;

    use sprig::ast::{Expr, LiteralValue, Stmt};
    use sprig::ast_printer::AstPrinter;
    use sprig::error::SprigError;
    use sprig::parse_source;
    use sprig::parser::{Parser, MAX_NESTING};
    use sprig::token::{Position, Token};

    fn assert_ast(source: &str, expected: &str) {
        match parse_source(source) {
            Ok(program) => assert_eq!(AstPrinter::print_program(&program), expected),
            Err(e) => panic!("unexpected error for {:?}: {}", source, e),
        }
    }

    fn assert_parse_error(source: &str, fragment: &str) -> SprigError {
        let err: SprigError = match parse_source(source) {
            Ok(program) => panic!(
                "expected a parse error, got {}",
                AstPrinter::print_program(&program)
            ),
            Err(e) => e,
        };

        assert!(err.is_parse(), "expected ParseError, got: {}", err);
        assert!(
            err.to_string().contains(fragment),
            "error {:?} should mention {:?}",
            err.to_string(),
            fragment
        );

        err
    }

    #[test]
    fn test_parser_01_arithmetic_precedence() {
        assert_ast("print(1 + 2 * 3);", "(print (+ 1.0 (* 2.0 3.0)))");
        assert_ast("print((1 + 2) * 3);", "(print (* (group (+ 1.0 2.0)) 3.0))");
        assert_ast("print(8 / 4 / 2);", "(print (/ (/ 8.0 4.0) 2.0))");
        assert_ast("let x = -a - b;", "(let x (- (- a) b))");
        assert_ast("print(!!ok);", "(print (! (! ok)))");
    }

    #[test]
    fn test_parser_02_comparison_and_logic() {
        assert_ast("print(a == b < c);", "(print (== a (< b c)))");
        assert_ast("print(a or b and c);", "(print (or a (and b c)))");
        assert_ast(
            "print(x in xs and y not in \"abc\");",
            "(print (and (in x xs) (not in y \"abc\")))",
        );
        assert_ast("print(1 + 2 in xs);", "(print (in (+ 1.0 2.0) xs))");
        assert_ast("print(a <= b >= c);", "(print (>= (<= a b) c))");
    }

    #[test]
    fn test_parser_03_assignment_is_right_associative() {
        assert_ast("a = b = 3;", "(expr (= a (= b 3.0)))");
        assert_ast("let y = x++;", "(let y (post++ x))");
        assert_ast("n--;", "(expr (post-- n))");
    }

    #[test]
    fn test_parser_04_calls_and_lists() {
        assert_ast("f(1)(2);", "(expr (call (call f 1.0) 2.0))");
        assert_ast("print(g());", "(print (call g))");
        assert_ast(
            "print([1, \"two\", [3]]);",
            "(print (list 1.0 \"two\" (list 3.0)))",
        );
        assert_ast("let empty = [];", "(let empty (list))");
        assert_ast("let nothing;", "(let nothing)");
    }

    #[test]
    fn test_parser_05_if_elif_else_blocks() {
        let source = "if a:\n    print(1);\nelif b:\n    print(2);\nelif c:\n    print(3);\nelse:\n    print(4);\n";

        assert_ast(
            source,
            "(if a (block (print 1.0)) (elif b (block (print 2.0))) (elif c (block (print 3.0))) (else (block (print 4.0))))",
        );
    }

    #[test]
    fn test_parser_06_inline_suites() {
        assert_ast(
            "if a: print(1); print(2);\nprint(3);",
            "(if a (block (print 1.0) (print 2.0)))\n(print 3.0)",
        );
        assert_ast(
            "let i = 0; while i < 3: print(i); i = i + 1;",
            "(let i 0.0)\n(while (< i 3.0) (block (print i) (expr (= i (+ i 1.0)))))",
        );
    }

    #[test]
    fn test_parser_07_return_ends_an_inline_suite() {
        assert_ast(
            "def add(a, b): return a + b; print(add(2, 3));",
            "(def add (a b) (block (return (+ a b))))\n(print (call add 2.0 3.0))",
        );
    }

    #[test]
    fn test_parser_08_nested_function_blocks() {
        let source = "def make():\n    let n = 0;\n    def next():\n        n = n + 1;\n        return n;\n    return next;\n";

        assert_ast(
            source,
            "(def make () (block (let n 0.0) (def next () (block (expr (= n (+ n 1.0))) (return n))) (return next)))",
        );
        assert_ast("def f():\n    return;\n", "(def f () (block (return)))");
    }

    #[test]
    fn test_parser_09_for_loops() {
        assert_ast(
            "for i in 10 step 2: print(i);",
            "(for i 10.0 (step 2.0) (block (print i)))",
        );
        assert_ast(
            "for c in \"abc\":\n    print(c);\n",
            "(for c \"abc\" (block (print c)))",
        );
        assert_ast(
            "for x in [1, 2] step -1: print(x);",
            "(for x (list 1.0 2.0) (step (- 1.0)) (block (print x)))",
        );
    }

    #[test]
    fn test_parser_10_blank_lines_and_comments_between_statements() {
        assert_ast(
            "// header\n\nlet a = 1;\n\n\nif a:\n\n    // inside\n    print(a);\n\nprint(2);\n",
            "(let a 1.0)\n(if a (block (print a)))\n(print 2.0)",
        );
    }

    #[test]
    fn test_parser_11_invalid_assignment_target() {
        assert_parse_error("1 + 2 = 3;", "invalid assignment target");
        assert_parse_error("f() = 3;", "invalid assignment target");
    }

    #[test]
    fn test_parser_12_invalid_increment_target() {
        assert_parse_error("(a + b)++;", "invalid '++' target");
        assert_parse_error("5--;", "invalid '--' target");
    }

    #[test]
    fn test_parser_13_expected_vs_found() {
        let err = assert_parse_error(
            "print(1)",
            "expected ';' after print statement, found end of line",
        );
        assert_eq!(err.position(), Some(Position::new(1, 9)));

        assert_parse_error("let = 5;", "expected variable name, found '='");
        assert_parse_error("print(1 +);", "expected expression, found ')'");
        assert_parse_error("def f(a b): return a;", "expected ')' after parameters, found 'b'");
        assert_parse_error("while x print(x);", "expected ':' after while condition");
    }

    #[test]
    fn test_parser_14_block_requires_indent() {
        let err = assert_parse_error("if a:\nprint(1);\n", "expected an indented block, found 'print'");

        assert_eq!(err.position(), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_parser_15_argument_limit() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        assert_parse_error(&source, "cannot have more than 255 arguments");

        let args: Vec<String> = (0..255).map(|i| i.to_string()).collect();
        assert!(parse_source(&format!("f({});", args.join(", "))).is_ok());
    }

    #[test]
    fn test_parser_16_lex_errors_pass_through() {
        let err = parse_source("let s = \"oops").expect_err("unterminated string");

        assert!(err.is_lex());
        assert!(!err.is_parse());
    }

    #[test]
    fn test_parser_17_literals_round_trip() {
        let literals: [&str; 8] = ["42", "0", "3.5", "\"hello\"", "\"\"", "true", "false", "null"];

        for source in literals {
            let program = parse_source(&format!("print({});", source)).expect("valid literal");
            let Some(Stmt::Print(Expr::Literal(original))) = program.first() else {
                panic!("expected a print of a literal for {}", source);
            };

            let printed: String = AstPrinter::literal(original);
            let reparsed = parse_source(&format!("print({});", printed)).expect("printed literal parses");

            assert_eq!(
                reparsed.first(),
                Some(&Stmt::Print(Expr::Literal(original.clone()))),
                "round trip of {}",
                source
            );
        }

        assert_eq!(AstPrinter::literal(&LiteralValue::Number(7.0)), "7.0");
        assert_eq!(AstPrinter::literal(&LiteralValue::Number(0.25)), "0.25");
    }

    #[test]
    fn test_parser_18_inline_return_before_else() {
        assert_ast(
            "def f(n):\n    if n < 2: return n;\n    else: return 0;\n",
            "(def f (n) (block (if (< n 2.0) (block (return n)) (else (block (return 0.0))))))",
        );
        assert_ast(
            "def g(n):\n    if n < 0: return -1;\n    elif n == 0: return 0;\n    return 1;\n",
            "(def g (n) (block (if (< n 0.0) (block (return (- 1.0))) (elif (== n 0.0) (block (return 0.0)))) (return 1.0)))",
        );
        assert_ast(
            "if a: print(1);\nelse: print(2);\n",
            "(if a (block (print 1.0)) (else (block (print 2.0))))",
        );
    }

    #[test]
    fn test_parser_19_nesting_limit() {
        let open: String = "(".repeat(200);
        let close: String = ")".repeat(200);
        assert_parse_error(&format!("print({}1{});", open, close), "nested too deeply");

        assert_parse_error(&format!("print({}1);", "-".repeat(200)), "nested too deeply");

        let mut source: String = String::new();
        for level in 0..(MAX_NESTING + 8) {
            source.push_str(&"    ".repeat(level));
            source.push_str("if a:\n");
        }
        source.push_str(&"    ".repeat(MAX_NESTING + 8));
        source.push_str("print(a);\n");
        assert_parse_error(&source, "nested too deeply");

        let open: String = "(".repeat(20);
        let close: String = ")".repeat(20);
        assert!(parse_source(&format!("print({}1{});", open, close)).is_ok());
    }

    #[test]
    fn test_parser_20_subscripts_and_methods() {
        assert_ast("print(xs[0]);", "(print (index xs 0.0))");
        assert_ast("print(grid[1][2]);", "(print (index (index grid 1.0) 2.0))");
        assert_ast("print(xs[1:3]);", "(print (slice xs 1.0 3.0))");
        assert_ast("print(xs[:2]);", "(print (slice xs _ 2.0))");
        assert_ast("print(xs[i + 1:]);", "(print (slice xs (+ i 1.0) _))");
        assert_ast("print(f()[0]);", "(print (index (call f) 0.0))");
        assert_ast("xs.push(4);", "(expr (.push xs 4.0))");
        assert_ast("xs.insertAt(0, \"a\");", "(expr (.insertAt xs 0.0 \"a\"))");
        assert_ast("print(xs.len() + 1);", "(print (+ (.len xs) 1.0))");
    }

    #[test]
    fn test_parser_21_method_call_errors() {
        assert_parse_error("f().len();", "invalid method receiver");
        assert_parse_error("xs.shuffle();", "unknown list method 'shuffle'");
        assert_parse_error("xs.len;", "expected '(' after method name");
        assert_parse_error("print(xs[1);", "expected ']' after index, found ')'");
        assert_parse_error("xs[0] = 1;", "invalid assignment target");
    }

    #[test]
    fn test_parser_22_empty_token_slice() {
        let tokens: Vec<Token<'_>> = Vec::new();

        assert_eq!(Parser::new(&tokens).parse().ok(), Some(Vec::new()));

        let err: SprigError = Parser::new(&tokens)
            .parse_expression()
            .expect_err("no expression in an empty slice");
        assert!(err.to_string().contains("expected expression, found end of input"));
    }
}
