/// Spec tests for the Yap tree-walking evaluator.
///
/// Everything goes through `Interpreter::run`, the same entry point the
/// driver and the REPL use, so these cover lexing and parsing glue as well
/// as runtime semantics.
use yap::interpreter::Interpreter;
use yap::value::{RuntimeError, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run(src: &str) -> Result<Value, RuntimeError> {
    Interpreter::new().run(src)
}

fn eval(src: &str) -> Value {
    match run(src) {
        Ok(value) => value,
        Err(err) => panic!("evaluation of {:?} failed: {}", src, err),
    }
}

fn eval_err(src: &str) -> String {
    match run(src) {
        Err(RuntimeError::Error(msg)) => msg,
        other => panic!("expected a runtime error for {:?}, got {:?}", src, other),
    }
}

fn inspect(src: &str) -> String {
    eval(src).inspect()
}

// ---------------------------------------------------------------------------
// Integer arithmetic
// ---------------------------------------------------------------------------

#[test]
fn int_literal() {
    assert_eq!(eval("5;"), Value::Int(5));
}

#[test]
fn int_arithmetic_respects_precedence() {
    assert_eq!(eval("10 + 2 * 3;"), Value::Int(16));
    assert_eq!(eval("10 + 2 * 3;"), eval("10 + (2 * 3);"));
}

#[test]
fn int_sub_mul_div() {
    assert_eq!(eval("10 - 4;"), Value::Int(6));
    assert_eq!(eval("3 * 4;"), Value::Int(12));
    assert_eq!(eval("7 / 2;"), Value::Int(3));
}

#[test]
fn int_modulo() {
    assert_eq!(eval("7 % 3;"), Value::Int(1));
}

#[test]
fn int_power_truncates() {
    assert_eq!(eval("2 ** 3;"), Value::Int(8));
    assert_eq!(eval("2 ** -1;"), Value::Int(0));
}

#[test]
fn int_arithmetic_wraps_on_overflow() {
    assert_eq!(
        eval("9223372036854775807 + 1;"),
        Value::Int(i64::MIN)
    );
    assert_eq!(
        eval("propose i = 9223372036854775807; ++i;"),
        Value::Int(i64::MIN)
    );
}

#[test]
fn negation() {
    assert_eq!(eval("-5;"), Value::Int(-5));
    assert_eq!(eval("-(2 + 3);"), Value::Int(-5));
    assert_eq!(eval("-2.5;"), Value::Float(-2.5));
}

#[test]
fn negation_of_a_boolean_is_an_error() {
    assert_eq!(eval_err("-nocap;"), "unknown operator: -BOOLEAN");
}

// ---------------------------------------------------------------------------
// Float arithmetic and promotion
// ---------------------------------------------------------------------------

#[test]
fn float_arithmetic() {
    assert_eq!(eval("1.5 + 2.5;"), Value::Float(4.0));
    assert_eq!(eval("5.0 / 2.0;"), Value::Float(2.5));
}

#[test]
fn int_promotes_to_float() {
    assert_eq!(eval("1 + 2.5;"), Value::Float(3.5));
    assert_eq!(eval("2.5 + 1;"), Value::Float(3.5));
    assert_eq!(eval("1 == 1.0;"), Value::Bool(true));
}

#[test]
fn float_modulo_is_null() {
    assert_eq!(eval("7.0 % 3.0;"), Value::Null);
}

#[test]
fn float_power() {
    assert_eq!(eval("2.0 ** 2;"), Value::Float(4.0));
}

// ---------------------------------------------------------------------------
// Division by zero is fatal
// ---------------------------------------------------------------------------

#[test]
fn int_division_by_zero() {
    assert!(matches!(run("5 / 0;"), Err(RuntimeError::DivisionByZero)));
}

#[test]
fn float_division_by_zero() {
    assert!(matches!(
        run("5.0 / 0.0;"),
        Err(RuntimeError::DivisionByZero)
    ));
}

#[test]
fn modulo_by_zero() {
    assert!(matches!(run("5 % 0;"), Err(RuntimeError::DivisionByZero)));
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

#[test]
fn string_concat() {
    assert_eq!(
        eval("\"Hello\" + \" \" + \"World\";"),
        Value::Str("Hello World".to_string())
    );
}

#[test]
fn string_repetition_count_from_int() {
    assert_eq!(eval("\"ab\" * 3;"), Value::Str("ababab".to_string()));
    assert_eq!(eval("3 * \"ab\";"), Value::Str("ababab".to_string()));
}

#[test]
fn string_repetition_count_from_decimal_string() {
    assert_eq!(eval("\"ab\" * \"3\";"), Value::Str("ababab".to_string()));
}

#[test]
fn int_concatenates_as_decimal_text() {
    assert_eq!(eval("\"a\" + 1;"), Value::Str("a1".to_string()));
    assert_eq!(eval("1 + \"a\";"), Value::Str("1a".to_string()));
}

#[test]
fn other_string_operators_error() {
    assert_eq!(
        eval_err("\"a\" - \"b\";"),
        "operator '-' is not supported for strings"
    );
    assert_eq!(
        eval_err("\"a\" == \"a\";"),
        "operator '==' is not supported for strings"
    );
}

#[test]
fn non_numeric_string_repetition_errors() {
    assert_eq!(eval_err("\"a\" * \"b\";"), "cannot multiply 'a' and 'b'");
}

// ---------------------------------------------------------------------------
// Booleans, truthiness, equality
// ---------------------------------------------------------------------------

#[test]
fn boolean_literals_and_aliases() {
    assert_eq!(eval("nocap;"), Value::Bool(true));
    assert_eq!(eval("cap;"), Value::Bool(false));
    assert_eq!(eval("true;"), Value::Bool(true));
}

#[test]
fn bang_inverts_truthiness() {
    assert_eq!(eval("!cap;"), Value::Bool(true));
    assert_eq!(eval("!!nocap;"), Value::Bool(true));
    // Zero and the empty string are truthy.
    assert_eq!(eval("!0;"), Value::Bool(false));
    assert_eq!(eval("!\"\";"), Value::Bool(false));
    assert_eq!(eval("![];"), Value::Bool(false));
}

#[test]
fn boolean_equality() {
    assert_eq!(eval("nocap == nocap;"), Value::Bool(true));
    assert_eq!(eval("nocap != cap;"), Value::Bool(true));
}

#[test]
fn mismatched_types_are_never_equal() {
    assert_eq!(eval("5 == nocap;"), Value::Bool(false));
    assert_eq!(eval("5 != nocap;"), Value::Bool(true));
}

#[test]
fn arrays_compare_by_identity() {
    assert_eq!(eval("[1] == [1];"), Value::Bool(false));
    assert_eq!(eval("propose a = [1]; a == a;"), Value::Bool(true));
}

#[test]
fn type_mismatch_on_arithmetic() {
    assert_eq!(eval_err("5 + true;"), "type mismatch: INTEGER + BOOLEAN");
    assert_eq!(eval_err("nocap + cap;"), "unknown operator: BOOLEAN + BOOLEAN");
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

#[test]
fn let_then_reassign() {
    assert_eq!(eval("propose a = 5; a = a + 1; a;"), Value::Int(6));
}

#[test]
fn let_without_value_binds_null() {
    assert_eq!(eval("propose a; a;"), Value::Null);
}

#[test]
fn null_binding_accepts_any_type_once() {
    assert_eq!(eval("propose a; a = 5; a;"), Value::Int(5));
}

#[test]
fn reassign_is_type_locked() {
    let msg = eval_err("propose a = 5; a = \"five\";");
    assert_eq!(
        msg,
        "type mismatch: cannot assign STRING to 'a' (currently INTEGER)"
    );
}

#[test]
fn reassign_undeclared_errors() {
    assert_eq!(eval_err("b = 1;"), "cannot assign to undeclared variable 'b'");
}

#[test]
fn const_cannot_be_reassigned() {
    assert_eq!(
        eval_err("ackchyually x = 1; x = 2;"),
        "cannot reassign constant 'x'"
    );
}

#[test]
fn const_can_be_read() {
    assert_eq!(eval("ackchyually x = 41; x + 1;"), Value::Int(42));
}

#[test]
fn const_can_be_shadowed_in_a_function() {
    assert_eq!(
        eval("ackchyually x = 1; propose f = func() { propose x = 2; x; }; f();"),
        Value::Int(2)
    );
}

#[test]
fn global_writes_to_the_root_scope() {
    assert_eq!(
        eval("propose f = func() { worldwide g = 99; }; f(); g;"),
        Value::Int(99)
    );
}

#[test]
fn identifier_not_found() {
    assert_eq!(eval_err("ghost;"), "identifier not found: ghost");
}

// ---------------------------------------------------------------------------
// Increment / decrement
// ---------------------------------------------------------------------------

#[test]
fn prefix_increment_mutates_and_returns() {
    assert_eq!(eval("propose i = 0; ++i;"), Value::Int(1));
    assert_eq!(eval("propose i = 0; ++i; i;"), Value::Int(1));
}

#[test]
fn postfix_increment_mutates_and_returns() {
    assert_eq!(eval("propose i = 0; i++; i;"), Value::Int(1));
}

#[test]
fn decrement() {
    assert_eq!(eval("propose i = 5; i--; --i; i;"), Value::Int(3));
}

#[test]
fn increment_of_a_float() {
    assert_eq!(eval("propose f = 1.5; ++f;"), Value::Float(2.5));
}

#[test]
fn increment_mutates_through_the_chain() {
    assert_eq!(
        eval("propose i = 0; propose f = func() { ++i; }; f(); f(); i;"),
        Value::Int(2)
    );
}

#[test]
fn increment_of_a_literal_errors() {
    assert_eq!(eval_err("++5;"), "operand of '++' must be an identifier");
}

#[test]
fn increment_of_a_string_binding_errors() {
    assert_eq!(
        eval_err("propose s = \"x\"; ++s;"),
        "unknown operator: ++STRING"
    );
}

#[test]
fn increment_of_a_const_errors() {
    assert_eq!(
        eval_err("ackchyually x = 1; ++x;"),
        "cannot reassign constant 'x'"
    );
}

// ---------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------

#[test]
fn if_takes_the_truthy_branch() {
    assert_eq!(eval("perhaps (1 < 2) { 10; }"), Value::Int(10));
}

#[test]
fn if_without_match_is_null() {
    assert_eq!(eval("perhaps (cap) { 10; }"), Value::Null);
}

#[test]
fn first_truthy_elif_wins() {
    assert_eq!(
        eval("perhaps (cap) { 1; } perchance (cap) { 2; } perchance (nocap) { 3; } otherwise { 4; }"),
        Value::Int(3)
    );
}

#[test]
fn else_runs_when_nothing_matches() {
    assert_eq!(
        eval("perhaps (cap) { 1; } perchance (cap) { 2; } otherwise { 4; }"),
        Value::Int(4)
    );
}

#[test]
fn ternary_picks_a_branch() {
    assert_eq!(
        eval("propose x = 5; x > 0 ? \"pos\" : \"neg\";"),
        Value::Str("pos".to_string())
    );
    assert_eq!(
        eval("propose x = -5; x > 0 ? \"pos\" : \"neg\";"),
        Value::Str("neg".to_string())
    );
}

#[test]
fn nested_return_unwinds_to_the_outermost_block() {
    assert_eq!(
        eval("perhaps (10 > 1) { perhaps (5 > 1) { sayless 10; } sayless 1; }"),
        Value::Int(10)
    );
}

#[test]
fn top_level_return_is_the_program_result() {
    assert_eq!(eval("sayless 7; 9;"), Value::Int(7));
}

#[test]
fn blocks_do_not_open_a_scope() {
    // A `propose` inside `perhaps` lands in the enclosing scope.
    assert_eq!(eval("perhaps (nocap) { propose x = 3; } x;"), Value::Int(3));
}

// ---------------------------------------------------------------------------
// For loops
// ---------------------------------------------------------------------------

#[test]
fn for_appends_three_times() {
    assert_eq!(
        eval("propose arr = [1, 2, 3]; propose i = 0; for (i < 3; ++i) { arr = append(arr, i); } len(arr);"),
        Value::Int(6)
    );
}

#[test]
fn for_with_init_leaks_its_binding() {
    assert_eq!(eval("for (propose i = 0; i < 5; ++i) { } i;"), Value::Int(5));
}

#[test]
fn for_with_condition_only() {
    assert_eq!(
        eval("propose i = 0; for (i < 3) { i = i + 1; } i;"),
        Value::Int(3)
    );
}

#[test]
fn for_body_return_terminates_the_loop() {
    assert_eq!(
        eval("propose f = func() { for (nocap) { sayless 42; } }; f();"),
        Value::Int(42)
    );
}

#[test]
fn for_never_runs_on_a_falsy_test() {
    assert_eq!(
        eval("propose hits = 0; for (cap; ++hits) { hits = hits + 100; } hits;"),
        Value::Int(0)
    );
}

// ---------------------------------------------------------------------------
// Functions and closures
// ---------------------------------------------------------------------------

#[test]
fn call_with_arguments() {
    assert_eq!(
        eval("propose add = func(x, y) { x + y; }; add(3, 4);"),
        Value::Int(7)
    );
}

#[test]
fn implicit_return_of_the_last_statement() {
    assert_eq!(eval("propose f = func(x) { x * 2; }; f(4);"), Value::Int(8));
}

#[test]
fn explicit_return_short_circuits() {
    assert_eq!(
        eval("propose f = func(x) { sayless x; 99; }; f(1);"),
        Value::Int(1)
    );
}

#[test]
fn closures_capture_their_definition_environment() {
    assert_eq!(
        eval("propose newAdder = func(x) { func(y) { x + y; }; }; propose addTwo = newAdder(2); addTwo(5);"),
        Value::Int(7)
    );
}

#[test]
fn closures_share_mutable_state() {
    assert_eq!(
        eval(concat!(
            "propose counter = func() { propose n = 0; func() { n = n + 1; n; }; };",
            "propose tick = counter();",
            "tick(); tick(); tick();"
        )),
        Value::Int(3)
    );
}

#[test]
fn closures_see_current_values_not_snapshots() {
    // Defined inside an `perhaps` block, referencing an outer binding that
    // changes afterwards.
    assert_eq!(
        eval("propose x = 1; perhaps (nocap) { propose f = func() { x; }; } x = 2; f();"),
        Value::Int(2)
    );
}

#[test]
fn parameters_shadow_outer_bindings() {
    assert_eq!(
        eval("propose x = 1; propose f = func(x) { x; }; f(42);"),
        Value::Int(42)
    );
}

#[test]
fn named_function_binds_itself() {
    assert_eq!(eval("func add(x, y) { x + y; } add(1, 2);"), Value::Int(3));
}

#[test]
fn named_function_supports_recursion() {
    assert_eq!(
        eval("func fact(n) { n < 2 ? 1 : n * fact(n - 1); } fact(5);"),
        Value::Int(120)
    );
}

#[test]
fn surplus_arguments_are_ignored() {
    assert_eq!(eval("propose f = func(x) { x; }; f(1, 2, 3);"), Value::Int(1));
}

#[test]
fn missing_arguments_leave_parameters_unbound() {
    assert_eq!(
        eval_err("propose f = func(x, y) { y; }; f(1);"),
        "identifier not found: y"
    );
}

#[test]
fn calling_a_non_function_errors() {
    assert_eq!(eval_err("5(1);"), "not a function: INTEGER");
}

#[test]
fn functions_are_first_class() {
    assert_eq!(
        eval("propose apply = func(f, x) { f(x); }; apply(func(n) { n + 1; }, 41);"),
        Value::Int(42)
    );
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

#[test]
fn array_indexing() {
    assert_eq!(eval("[10, 20, 30][1];"), Value::Int(20));
}

#[test]
fn array_index_out_of_range_is_null() {
    assert_eq!(eval("[1, 2, 3][3];"), Value::Null);
    assert_eq!(eval("[1, 2, 3][-1];"), Value::Null);
}

#[test]
fn mixed_array_literal_is_a_type_mismatch() {
    assert_eq!(
        eval_err("[1, \"a\"];"),
        "type mismatch: cannot have an array of INTEGER and STRING"
    );
}

#[test]
fn nested_arrays_are_uniform() {
    assert_eq!(eval("[[1, 2], [3, 4]][1][0];"), Value::Int(3));
}

#[test]
fn arrays_are_reference_semantic() {
    assert_eq!(
        eval("propose a = [1, 2, 3]; propose b = a; pop(a); len(b);"),
        Value::Int(2)
    );
}

#[test]
fn indexing_an_integer_errors() {
    assert_eq!(eval_err("5[0];"), "index operator not supported: INTEGER");
}

// ---------------------------------------------------------------------------
// Hashes
// ---------------------------------------------------------------------------

#[test]
fn hash_lookup() {
    assert_eq!(eval("{\"one\": 1, \"two\": 2}[\"two\"];"), Value::Int(2));
}

#[test]
fn hash_missing_key_is_null() {
    assert_eq!(eval("{}[\"x\"];"), Value::Null);
}

#[test]
fn hash_keys_can_be_any_hashable_scalar() {
    assert_eq!(eval("{1: \"int\"}[1];"), Value::Str("int".to_string()));
    assert_eq!(eval("{1.5: \"float\"}[1.5];"), Value::Str("float".to_string()));
    assert_eq!(eval("{nocap: \"bool\"}[nocap];"), Value::Str("bool".to_string()));
}

#[test]
fn unhashable_literal_key_errors() {
    assert_eq!(eval_err("{[1]: 2};"), "unusable as hash key: ARRAY");
}

#[test]
fn unhashable_index_errors() {
    assert_eq!(
        eval_err("{\"a\": 1}[func() { 1; }];"),
        "unusable as hash key: FUNCTION"
    );
}

#[test]
fn duplicate_keys_overwrite_but_keep_position() {
    assert_eq!(eval("{\"a\": 1, \"a\": 2}[\"a\"];"), Value::Int(2));
    assert_eq!(eval("len(keys({\"a\": 1, \"a\": 2}));"), Value::Int(1));
}

// ---------------------------------------------------------------------------
// Built-ins
// ---------------------------------------------------------------------------

#[test]
fn len_of_strings_and_arrays() {
    assert_eq!(eval("len(\"hello\");"), Value::Int(5));
    assert_eq!(eval("len(\"\");"), Value::Int(0));
    assert_eq!(eval("len([1, 2, 3]);"), Value::Int(3));
}

#[test]
fn len_of_an_integer_errors() {
    assert_eq!(
        eval_err("len(1);"),
        "argument to `len` not supported, got INTEGER"
    );
}

#[test]
fn len_arity() {
    assert_eq!(
        eval_err("len(\"a\", \"b\");"),
        "wrong number of arguments to `len`: expected 1, got 2"
    );
}

#[test]
fn append_does_not_mutate() {
    assert_eq!(
        eval("propose a = [1]; propose b = append(a, 2); len(a);"),
        Value::Int(1)
    );
    assert_eq!(
        eval("propose a = [1]; propose b = append(a, 2); len(b);"),
        Value::Int(2)
    );
}

#[test]
fn append_splices_an_array_argument() {
    assert_eq!(eval("len(append([1, 2], [3, 4]));"), Value::Int(4));
}

#[test]
fn append_requires_an_array() {
    assert_eq!(
        eval_err("append(1, 2);"),
        "first argument to `append` must be an ARRAY, got INTEGER"
    );
}

#[test]
fn pop_removes_and_returns_the_last_element() {
    assert_eq!(eval("pop([1, 2, 3]);"), Value::Int(3));
    assert_eq!(eval("propose a = [1, 2, 3]; pop(a); len(a);"), Value::Int(2));
}

#[test]
fn pop_at_an_index() {
    assert_eq!(eval("propose a = [1, 2, 3]; pop(a, 0);"), Value::Int(1));
    assert_eq!(
        inspect("propose a = [1, 2, 3]; pop(a, 1); a;"),
        "[1, 3]"
    );
}

#[test]
fn pop_out_of_range_errors() {
    assert_eq!(
        eval_err("pop([1, 2], 5);"),
        "index out of range: array contains 2 elements"
    );
    assert_eq!(
        eval_err("pop([1, 2], -1);"),
        "index out of range: array contains 2 elements"
    );
}

#[test]
fn pop_from_an_empty_array_errors() {
    assert_eq!(eval_err("pop([]);"), "cannot pop from an empty array");
}

#[test]
fn keys_and_values_keep_insertion_order() {
    assert_eq!(
        inspect("keys({\"a\": 1, \"b\": 2, \"c\": 3});"),
        "[a, b, c]"
    );
    assert_eq!(
        inspect("values({\"a\": 1, \"b\": 2, \"c\": 3});"),
        "[1, 2, 3]"
    );
}

#[test]
fn keys_requires_a_hash() {
    assert_eq!(
        eval_err("keys([1]);"),
        "argument to `keys` must be a HASH, got ARRAY"
    );
}

#[test]
fn yap_returns_null() {
    assert_eq!(eval("yap(\"test output\", 1, nocap);"), Value::Null);
}

#[test]
fn scan_arity() {
    assert_eq!(
        eval_err("scan(1);"),
        "wrong number of arguments to `scan`: expected 0, got 1"
    );
}

#[test]
fn user_bindings_shadow_builtins() {
    assert_eq!(eval("propose len = 5; len;"), Value::Int(5));
}

// ---------------------------------------------------------------------------
// Inspect forms
// ---------------------------------------------------------------------------

#[test]
fn inspect_scalars() {
    assert_eq!(inspect("42;"), "42");
    assert_eq!(inspect("2.5 + 1.0;"), "3.5");
    // Floats print in shortest round-trip form.
    assert_eq!(inspect("1.5 + 1.5;"), "3");
    assert_eq!(inspect("nocap;"), "true");
    assert_eq!(inspect("\"raw text\";"), "raw text");
    assert_eq!(inspect("perhaps (cap) { 1; }"), "null");
}

#[test]
fn inspect_containers() {
    assert_eq!(inspect("[1, 2, 3];"), "[1, 2, 3]");
    assert_eq!(inspect("{\"a\": 1, \"b\": 2};"), "{a: 1, b: 2}");
}

#[test]
fn inspect_functions() {
    assert_eq!(
        inspect("func(x, y) { x + y; };"),
        "func(x, y) {\n(x + y);\n}"
    );
}

// ---------------------------------------------------------------------------
// Interpreter surface
// ---------------------------------------------------------------------------

#[test]
fn environment_persists_across_runs() {
    let mut interpreter = Interpreter::new();
    interpreter.run("propose x = 1;").unwrap();
    assert_eq!(interpreter.run("x + 1;").unwrap(), Value::Int(2));
}

#[test]
fn parse_errors_prevent_evaluation() {
    let err = run("propose = 5;").unwrap_err();
    assert!(err.to_string().contains("expected next token to be 'IDENT'"));
}

#[test]
fn runtime_errors_short_circuit() {
    // The error from the subexpression is the program's result; the
    // following statement never runs a reassignment that would stick.
    let mut interpreter = Interpreter::new();
    assert!(interpreter
        .run("propose a = 1; propose b = ghost + 1; a = 99;")
        .is_err());
    assert_eq!(interpreter.run("a;").unwrap(), Value::Int(1));
}
