use crate::scope::Scope;

#[test]
fn create_var_is_idempotent() {
    let mut scope = Scope::new();
    scope.create_var("x").set_size_hint(64);
    scope.create_var("x");
    assert_eq!(scope.len(), 1);
    assert_eq!(scope.find_var("x").unwrap().size_hint(), Some(64), "recreate must not reset the slot");
}

#[test]
fn find_var_misses_return_none() {
    let scope = Scope::new();
    assert!(scope.find_var("ghost").is_none());
}

#[test]
fn var_names_are_sorted() {
    let mut scope = Scope::new();
    scope.create_var("b");
    scope.create_var("a");
    let names: Vec<_> = scope.var_names().collect();
    assert_eq!(names, ["a", "b"]);
}
