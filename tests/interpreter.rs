#[cfg(test)]
mod interpreter_tests {
    use sprig_interpreter as sprig;

    use sprig::error::{RuntimeErrorKind, SprigError};
    use sprig::interpreter::{Interpreter, InterpreterConfig};
    use sprig::token::Position;
    use sprig::{parse_source, run, run_with_config, RunOutput};

    fn assert_output(source: &str, expected: &[&str]) {
        let out: RunOutput = run(source);

        assert!(
            out.error.is_none(),
            "unexpected error for {:?}: {}",
            source,
            out.error.as_ref().map(|e| e.to_string()).unwrap_or_default()
        );
        assert_eq!(out.lines, expected, "output of {:?}", source);
    }

    /// Runs `source`, expecting it to stop with a runtime error of `kind`
    /// after printing exactly `expected`.
    fn assert_runtime_error(source: &str, kind: RuntimeErrorKind, expected: &[&str]) -> SprigError {
        let out: RunOutput = run(source);

        assert_eq!(out.lines, expected, "output of {:?}", source);

        let err: SprigError = match out.error {
            Some(e) => e,
            None => panic!("expected a {} error for {:?}", kind, source),
        };

        assert_eq!(err.runtime_kind(), Some(kind), "error was: {}", err);

        err
    }

    // ───────────────────────── core scenarios ─────────────────────────

    #[test]
    fn test_interpreter_01_for_over_number() {
        assert_output("for x in 5: print(x);", &["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_interpreter_02_postfix_increment() {
        assert_output("let x = 5; x++; print(x);", &["6"]);
        assert_output("let x = 5; let y = x++; print(y); print(x);", &["5", "6"]);
        assert_output("let n = 3; print(n--); print(n);", &["3", "2"]);
    }

    #[test]
    fn test_interpreter_03_short_circuit() {
        assert_output("print(false and (1/0)); print(true or (1/0));", &["false", "true"]);
    }

    #[test]
    fn test_interpreter_04_logical_operators_yield_operands() {
        assert_output(
            "print(null or \"default\"); print(1 and 2); print(0 and 2); print(\"\" or 0);",
            &["default", "2", "0", "0"],
        );
    }

    #[test]
    fn test_interpreter_05_closure_counter() {
        let source = "\
def make_counter():
    let count = 0;
    def next():
        count = count + 1;
        return count;
    return next;
let counter = make_counter();
print(counter());
print(counter());
let other = make_counter();
print(other());
print(counter());
";

        assert_output(source, &["1", "2", "1", "3"]);
    }

    #[test]
    fn test_interpreter_06_closure_outlives_call() {
        assert_output(
            "def outer(n):\n    def inner(): return n;\n    return inner;\nprint(outer(7)());",
            &["7"],
        );
    }

    #[test]
    fn test_interpreter_07_single_line_function() {
        assert_output("def add(a, b): return a + b; print(add(2,3));", &["5"]);
    }

    #[test]
    fn test_interpreter_08_single_line_while() {
        assert_output("let i = 0; while i < 3: print(i); i = i + 1;", &["0", "1", "2"]);
    }

    #[test]
    fn test_interpreter_09_type_mismatch_prints_nothing() {
        assert_runtime_error("print(1 + \"a\");", RuntimeErrorKind::TypeMismatch, &[]);
    }

    #[test]
    fn test_interpreter_10_output_before_error_is_kept() {
        let err = assert_runtime_error(
            "print(1);\nlet x = 1;\nprint(x + y);\nprint(2);",
            RuntimeErrorKind::UndefinedVariable,
            &["1"],
        );

        assert_eq!(err.position(), Some(Position::new(3, 11)));
        assert_eq!(
            err.to_string(),
            "[line 3:11] RuntimeError (undefined-variable): Undefined variable 'y'."
        );
    }

    // ───────────────────────── values ─────────────────────────

    #[test]
    fn test_interpreter_11_print_rendering() {
        assert_output(
            "print(3.0); print(2.5); print(7 / 2); print(-4 * 2); print(\"hi\"); print(true); print(null);",
            &["3", "2.5", "3.5", "-8", "hi", "true", "null"],
        );
        assert_output(
            "print([1, \"a\", [true, null]]);\ndef f(): return 1;\nprint(f);",
            &["[1, a, [true, null]]", "<fn f>"],
        );
    }

    #[test]
    fn test_interpreter_12_truthiness() {
        let source = "\
if 0: print(\"zero\");
if 1: print(\"one\");
if \"\": print(\"empty\");
if \"x\": print(\"text\");
if null: print(\"null\");
if []: print(\"no items\");
if [0]: print(\"items\");
print(!0);
";

        assert_output(source, &["one", "text", "items", "true"]);
    }

    #[test]
    fn test_interpreter_13_strings_and_equality() {
        assert_output(
            "print(\"foo\" + \"bar\"); print(\"a\" < \"b\"); print(1 == \"1\"); print([1, 2] == [1, 2]); print(null == null); print(2 != 3);",
            &["foobar", "true", "false", "true", "true", "true"],
        );
        assert_runtime_error(
            "print(\"a\" < \"b\");\nprint(1 < \"b\");",
            RuntimeErrorKind::TypeMismatch,
            &["true"],
        );
        assert_runtime_error("print(\"a\" - \"b\");", RuntimeErrorKind::TypeMismatch, &[]);
        assert_runtime_error("print(-\"a\");", RuntimeErrorKind::TypeMismatch, &[]);
    }

    #[test]
    fn test_interpreter_14_membership() {
        assert_output(
            "print(\"ell\" in \"hello\"); print(2 not in [1, 2]); print(\"z\" not in \"abc\"); print([1] in [[1], 2]);",
            &["true", "false", "true", "true"],
        );
        assert_runtime_error("print(1 in 2);", RuntimeErrorKind::TypeMismatch, &[]);
        assert_runtime_error("print(1 in \"123\");", RuntimeErrorKind::TypeMismatch, &[]);
    }

    #[test]
    fn test_interpreter_15_division_by_zero() {
        assert_runtime_error("print(1 / 0);", RuntimeErrorKind::DivisionByZero, &[]);
    }

    // ───────────────────────── control flow ─────────────────────────

    #[test]
    fn test_interpreter_16_if_elif_else() {
        let source = "\
def describe(n):
    if n < 0:
        return \"negative\";
    elif n == 0:
        return \"zero\";
    else:
        return \"positive\";
print(describe(-5));
print(describe(0));
print(describe(5));
";

        assert_output(source, &["negative", "zero", "positive"]);
    }

    #[test]
    fn test_interpreter_17_for_steps_and_bounds() {
        assert_output("for i in 10 step 3: print(i);", &["0", "3", "6", "9"]);
        assert_output("for i in -3: print(i);", &["0", "-1", "-2"]);
        assert_output("for i in -4 step -2: print(i);", &["0", "-2"]);
        assert_output("for i in 0: print(i);\nfor i in 3 step -1: print(i);\nprint(\"done\");", &["done"]);
        assert_runtime_error("for i in 5 step 0: print(i);", RuntimeErrorKind::ZeroStep, &[]);
    }

    #[test]
    fn test_interpreter_18_for_over_sequences() {
        assert_output("for x in [1, 2, 3]: print(x * 2);", &["2", "4", "6"]);
        assert_output("for x in [1, 2, 3, 4] step -2: print(x);", &["4", "2"]);
        assert_output("for c in \"abc\": print(c);", &["a", "b", "c"]);
        assert_output("for c in \"\": print(c);\nprint(\"end\");", &["end"]);
        assert_runtime_error("for x in true: print(x);", RuntimeErrorKind::NotIterable, &[]);
        assert_runtime_error(
            "for x in [1, 2] step 0.5: print(x);",
            RuntimeErrorKind::TypeMismatch,
            &[],
        );
    }

    #[test]
    fn test_interpreter_19_return_from_inside_loops() {
        let source = "\
def find(xs, target):
    let i = 0;
    for x in xs:
        if x == target:
            return i;
        i++;
    return -1;
print(find([4, 5, 6], 6));
print(find([4, 5, 6], 9));
def first_over(limit):
    let n = 0;
    while true:
        n = n + 1;
        if n > limit: return n;
print(first_over(3));
";

        assert_output(source, &["2", "-1", "4"]);
    }

    #[test]
    fn test_interpreter_20_recursion() {
        assert_output(
            "def fib(n):\n    if n < 2: return n;\n    return fib(n - 1) + fib(n - 2);\nprint(fib(10));",
            &["55"],
        );
    }

    #[test]
    fn test_interpreter_21_function_without_return_yields_null() {
        assert_output("def noop(): let x = 1;\nprint(noop());", &["null"]);
    }

    // ───────────────────────── scoping ─────────────────────────

    #[test]
    fn test_interpreter_22_loop_scopes_do_not_leak() {
        assert_runtime_error(
            "let i = 0;\nwhile i < 1:\n    let inner = 5;\n    i = i + 1;\nprint(i);\nprint(inner);",
            RuntimeErrorKind::UndefinedVariable,
            &["1"],
        );
        assert_runtime_error(
            "for k in 2: print(k);\nprint(k);",
            RuntimeErrorKind::UndefinedVariable,
            &["0", "1"],
        );
    }

    #[test]
    fn test_interpreter_23_if_bodies_get_a_child_scope() {
        assert_runtime_error(
            "if true:\n    let x = 1;\nprint(x);\n",
            RuntimeErrorKind::UndefinedVariable,
            &[],
        );
        assert_runtime_error(
            "if false: print(0);\nelif true: let e = 1;\nprint(e);",
            RuntimeErrorKind::UndefinedVariable,
            &[],
        );
        assert_runtime_error(
            "if false: print(0);\nelse:\n    let e = 2;\n    print(e);\nprint(e);",
            RuntimeErrorKind::UndefinedVariable,
            &["2"],
        );

        assert_output("let y = 1;\nif true: y = 2;\nprint(y);", &["2"]);
        assert_output(
            "let z = 1;\nif true: let z = 5; print(z);\nprint(z);",
            &["5", "1"],
        );
        assert_output(
            "let n = 0;\nfor i in 4:\n    if i > 1: n = n + i;\nprint(n);",
            &["5"],
        );
    }

    #[test]
    fn test_interpreter_24_shadowing_and_assignment() {
        assert_output(
            "let a = 1;\ndef f():\n    let a = 2;\n    return a;\nprint(f());\nprint(a);",
            &["2", "1"],
        );
        assert_output(
            "let total = 0;\ndef add(n): total = total + n;\nadd(2);\nadd(3);\nprint(total);",
            &["5"],
        );
        assert_runtime_error("undeclared = 1;", RuntimeErrorKind::UndefinedVariable, &[]);
    }

    // ───────────────────────── call errors ─────────────────────────

    #[test]
    fn test_interpreter_25_call_errors() {
        assert_runtime_error("foo(1);", RuntimeErrorKind::UndefinedFunction, &[]);
        assert_runtime_error("let x = 3; x();", RuntimeErrorKind::NotCallable, &[]);
        assert_runtime_error("print(\"s\"(1));", RuntimeErrorKind::NotCallable, &[]);
        assert_runtime_error(
            "def f(a): return a;\nprint(f(1));\nf(1, 2);",
            RuntimeErrorKind::ArityMismatch,
            &["1"],
        );
    }

    #[test]
    fn test_interpreter_26_return_outside_function() {
        assert_runtime_error("return 1;", RuntimeErrorKind::ReturnOutsideFunction, &[]);
        assert_runtime_error(
            "print(0);\nif true: return;",
            RuntimeErrorKind::ReturnOutsideFunction,
            &["0"],
        );
    }

    #[test]
    fn test_interpreter_27_postfix_requires_number() {
        assert_runtime_error("let s = \"a\"; s++;", RuntimeErrorKind::TypeMismatch, &[]);
        assert_runtime_error("missing++;", RuntimeErrorKind::UndefinedVariable, &[]);
    }

    // ───────────────────────── limits ─────────────────────────

    #[test]
    fn test_interpreter_28_call_depth_limit() {
        let config = InterpreterConfig {
            step_limit: None,
            max_call_depth: 25,
        };
        let out = run_with_config("def f(n): return f(n + 1);\nf(0);", config);

        assert_eq!(
            out.error.and_then(|e| e.runtime_kind()),
            Some(RuntimeErrorKind::CallDepthExceeded)
        );

        let out = run_with_config(
            "def down(n):\n    if n == 0: return 0;\n    return down(n - 1);\nprint(down(20));",
            config,
        );
        assert!(out.is_ok());
        assert_eq!(out.lines, vec!["0"]);
    }

    #[test]
    fn test_interpreter_29_step_limit() {
        let config = InterpreterConfig {
            step_limit: Some(100),
            ..InterpreterConfig::default()
        };
        let out = run_with_config("while true: let x = 1;", config);

        assert_eq!(
            out.error.and_then(|e| e.runtime_kind()),
            Some(RuntimeErrorKind::StepLimitExceeded)
        );
        assert_eq!(InterpreterConfig::default().step_limit, None);
        assert_eq!(InterpreterConfig::default().max_call_depth, 200);
    }

    // ───────────────────────── entry points ─────────────────────────

    #[test]
    fn test_interpreter_30_static_errors_produce_no_output() {
        let out = run("print(1);\nlet s = \"oops");
        assert!(out.lines.is_empty());
        assert!(out.error.as_ref().is_some_and(|e| e.is_lex()));

        let out = run("print(1);\nprint(2)");
        assert!(out.lines.is_empty());
        assert!(out.error.as_ref().is_some_and(|e| e.is_parse()));
    }

    #[test]
    fn test_interpreter_31_session_survives_errors() {
        let mut interpreter = Interpreter::new(Vec::<String>::new());

        let first = parse_source("let a = 1;\ndef g(): return missing;").expect("valid program");
        interpreter.interpret(&first).expect("definitions run");

        let failing = parse_source("print(g());").expect("valid program");
        let err = interpreter.interpret(&failing).expect_err("g reads an undefined name");
        assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::UndefinedVariable));

        let after = parse_source("let b = a + 1;\nprint(b);").expect("valid program");
        interpreter.interpret(&after).expect("globals are still reachable");

        assert!(interpreter.globals().borrow().lookup("b").is_some());
        assert_eq!(interpreter.into_sink(), vec!["2".to_string()]);
    }

    // ───────────────────────── layout ─────────────────────────

    #[test]
    fn test_interpreter_32_inline_return_before_else() {
        let source = "\
def f(n):
    if n < 2: return n;
    else: return 0;
print(f(1));
print(f(5));
def sign(n):
    if n < 0: return -1;
    elif n == 0: return 0;
    return 1;
print(sign(-4));
print(sign(0));
print(sign(9));
";

        assert_output(source, &["1", "0", "-1", "0", "1"]);
    }

    #[test]
    fn test_interpreter_33_deep_recursion_within_default_limit() {
        let down = "def down(n):\n    if n == 0: return 0;\n    return down(n - 1);\n";

        assert_output(&format!("{}print(down(199));", down), &["0"]);
        assert_runtime_error(
            &format!("{}print(down(500));", down),
            RuntimeErrorKind::CallDepthExceeded,
            &[],
        );
    }

    // ───────────────────────── lists ─────────────────────────

    #[test]
    fn test_interpreter_34_indexing_and_slicing() {
        let source = "\
let xs = [10, 20, 30, 40];
print(xs[0]);
print(xs[3]);
print(xs[1:2]);
print(xs[:1]);
print(xs[2:]);
print(xs[3:1]);
let grid = [[1, 2], [3, 4]];
print(grid[1][0]);
let word = \"sprig\";
print(word[1]);
print(word[1:3]);
";

        assert_output(
            source,
            &["10", "40", "[20, 30]", "[10, 20]", "[30, 40]", "[]", "3", "p", "pri"],
        );
    }

    #[test]
    fn test_interpreter_35_list_methods() {
        let source = "\
let xs = [3, 1, 2];
xs.push(5);
print(xs);
print(xs.len());
print(xs.pop());
print(xs);
xs.insertAt(0, 9);
print(xs);
print(xs.remove(1));
print(xs.index(2));
print(xs.index(7));
print(xs.sort());
print(xs);
let names = [\"pear\", \"apple\"];
names.sort();
print(names);
";

        assert_output(
            source,
            &[
                "[3, 1, 2, 5]",
                "4",
                "5",
                "[3, 1, 2]",
                "[9, 3, 1, 2]",
                "3",
                "2",
                "-1",
                "[1, 2, 9]",
                "[1, 2, 9]",
                "[apple, pear]",
            ],
        );
    }

    #[test]
    fn test_interpreter_36_list_methods_rebind_the_name() {
        assert_output(
            "let xs = [1];\nlet ys = xs;\nxs.push(2);\nprint(xs);\nprint(ys);",
            &["[1, 2]", "[1]"],
        );
        assert_output(
            "let xs = [];\ndef fill(n):\n    for i in n: xs.push(i * i);\nfill(3);\nprint(xs);",
            &["[0, 1, 4]"],
        );
    }

    #[test]
    fn test_interpreter_37_index_errors() {
        assert_runtime_error("let xs = [1, 2];\nprint(xs[2]);", RuntimeErrorKind::IndexOutOfRange, &[]);
        assert_runtime_error("let xs = [1, 2];\nprint(xs[-1]);", RuntimeErrorKind::IndexOutOfRange, &[]);
        assert_runtime_error("print(\"ab\"[5]);", RuntimeErrorKind::IndexOutOfRange, &[]);
        assert_runtime_error("let xs = [1];\nprint(xs[0:4]);", RuntimeErrorKind::IndexOutOfRange, &[]);
        assert_runtime_error("let xs = [];\nxs.pop();", RuntimeErrorKind::IndexOutOfRange, &[]);
        assert_runtime_error("let xs = [1];\nxs.remove(3);", RuntimeErrorKind::IndexOutOfRange, &[]);
        assert_runtime_error("let xs = [1];\nxs.insertAt(3, 0);", RuntimeErrorKind::IndexOutOfRange, &[]);

        assert_runtime_error("let xs = [1];\nprint(xs[0.5]);", RuntimeErrorKind::TypeMismatch, &[]);
        assert_runtime_error("let xs = [1];\nprint(xs[\"0\"]);", RuntimeErrorKind::TypeMismatch, &[]);
        assert_runtime_error("print(5[0]);", RuntimeErrorKind::TypeMismatch, &[]);
        assert_runtime_error("let n = 5;\nn.push(1);", RuntimeErrorKind::TypeMismatch, &[]);
        assert_runtime_error("let xs = [1, \"a\"];\nxs.sort();", RuntimeErrorKind::TypeMismatch, &[]);
        assert_runtime_error("let xs = [1];\nxs.push();", RuntimeErrorKind::ArityMismatch, &[]);
        assert_runtime_error("missing.len();", RuntimeErrorKind::UndefinedVariable, &[]);
    }
}
