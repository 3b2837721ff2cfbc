use crate::op_info::{AttrValue, OpInfo};

fn conv_info() -> OpInfo {
    let mut info = OpInfo::new("conv2d");
    info.add_input("Input", ["x"])
        .add_input("Filter", ["w"])
        .add_output("Output", ["y"]);
    info
}

#[test]
fn argument_groups_keep_declaration_order() {
    let info = conv_info();
    assert_eq!(info.input_argnames(), ["Input", "Filter"]);
    assert_eq!(info.input_names(), ["x", "w"]);
    assert_eq!(info.output_names(), ["y"]);
}

#[test]
fn adding_to_an_existing_group_extends_it() {
    let mut info = OpInfo::new("concat");
    info.add_input("X", ["a"]);
    info.add_input("X", ["b", "c"]);
    assert_eq!(info.input("X").unwrap(), ["a", "b", "c"]);
    assert_eq!(info.input_argnames().len(), 1);
}

#[test]
fn find_argname_reports_the_owning_group() {
    let info = conv_info();
    assert_eq!(info.find_input_argname("w"), Some("Filter"));
    assert_eq!(info.find_input_argname("y"), None);
    assert_eq!(info.find_output_argname("y"), Some("Output"));
}

#[test]
fn update_all_inputs_renames_every_occurrence() {
    let mut info = OpInfo::new("add");
    info.add_input("X", ["t"]).add_input("Y", ["t"]);
    info.update_all_inputs("t", "t2");
    assert_eq!(info.input("X").unwrap(), ["t2"]);
    assert_eq!(info.input("Y").unwrap(), ["t2"]);
}

#[test]
fn attrs_round_trip() {
    let mut info = conv_info();
    info.set_attr("act_type", AttrValue::String("relu".into()));
    info.set_attr("groups", AttrValue::Int(2));

    assert_eq!(info.attr("act_type").and_then(AttrValue::as_str), Some("relu"));
    assert_eq!(info.attr("groups").and_then(AttrValue::as_int), Some(2));
    assert!(!info.has_attr("padding"));
}
