//! Built-in data types, predefined data and routines.

pub const NUM: &str = "num";
pub const BOOL: &str = "bool";
pub const STRING: &str = "string";
/// Type given to the symbol of a RECORD declaration itself.
pub const RECORD: &str = "record";

/// Atomic and structured data types known without a declaration.
pub const BUILTIN_TYPES: &[&str] = &[
    "num",
    "dnum",
    "bool",
    "string",
    "byte",
    "robtarget",
    "jointtarget",
    "tooldata",
    "wobjdata",
    "speeddata",
    "zonedata",
    "confdata",
    "orient",
    "pose",
    "pos",
    "loaddata",
    "robjoint",
    "extjoint",
    "errnum",
    "intnum",
    "signaldi",
    "signaldo",
    "signalai",
    "signalao",
];

/// Returns the canonical (lower-case) spelling if `name` is a built-in type.
pub fn builtin_type(name: &str) -> Option<&'static str> {
    BUILTIN_TYPES
        .iter()
        .find(|ty| ty.eq_ignore_ascii_case(name))
        .copied()
}

/// Built-in types are case-insensitive; user types are kept as written.
pub fn normalize_type(name: &str) -> String {
    builtin_type(name).map_or_else(|| name.to_string(), str::to_string)
}

const POS: &[(&str, &str)] = &[("x", NUM), ("y", NUM), ("z", NUM)];
const ORIENT: &[(&str, &str)] = &[("q1", NUM), ("q2", NUM), ("q3", NUM), ("q4", NUM)];
const POSE: &[(&str, &str)] = &[("trans", "pos"), ("rot", "orient")];
const CONFDATA: &[(&str, &str)] = &[("cf1", NUM), ("cf4", NUM), ("cf6", NUM), ("cfx", NUM)];
const AXES: &[(&str, &str)] = &[
    ("rax_1", NUM),
    ("rax_2", NUM),
    ("rax_3", NUM),
    ("rax_4", NUM),
    ("rax_5", NUM),
    ("rax_6", NUM),
];
const EXTAX: &[(&str, &str)] = &[
    ("eax_a", NUM),
    ("eax_b", NUM),
    ("eax_c", NUM),
    ("eax_d", NUM),
    ("eax_e", NUM),
    ("eax_f", NUM),
];
const ROBTARGET: &[(&str, &str)] = &[
    ("trans", "pos"),
    ("rot", "orient"),
    ("robconf", "confdata"),
    ("extax", "extjoint"),
];
const JOINTTARGET: &[(&str, &str)] = &[("robax", "robjoint"), ("extax", "extjoint")];
const LOADDATA: &[(&str, &str)] = &[
    ("mass", NUM),
    ("cog", "pos"),
    ("aom", "orient"),
    ("ix", NUM),
    ("iy", NUM),
    ("iz", NUM),
];
const TOOLDATA: &[(&str, &str)] = &[("robhold", BOOL), ("tframe", "pose"), ("tload", "loaddata")];
const WOBJDATA: &[(&str, &str)] = &[
    ("robhold", BOOL),
    ("ufprog", BOOL),
    ("ufmec", STRING),
    ("uframe", "pose"),
    ("oframe", "pose"),
];
const SPEEDDATA: &[(&str, &str)] = &[
    ("v_tcp", NUM),
    ("v_ori", NUM),
    ("v_leax", NUM),
    ("v_reax", NUM),
];
const ZONEDATA: &[(&str, &str)] = &[
    ("finep", BOOL),
    ("pzone_tcp", NUM),
    ("pzone_ori", NUM),
    ("pzone_eax", NUM),
    ("zone_ori", NUM),
    ("zone_leax", NUM),
    ("zone_reax", NUM),
];

/// Components of a built-in structured type, or `None` for atomic types.
pub fn builtin_components(ty: &str) -> Option<&'static [(&'static str, &'static str)]> {
    let components = match builtin_type(ty)? {
        "pos" => POS,
        "orient" => ORIENT,
        "pose" => POSE,
        "confdata" => CONFDATA,
        "robjoint" => AXES,
        "extjoint" => EXTAX,
        "robtarget" => ROBTARGET,
        "jointtarget" => JOINTTARGET,
        "loaddata" => LOADDATA,
        "tooldata" => TOOLDATA,
        "wobjdata" => WOBJDATA,
        "speeddata" => SPEEDDATA,
        "zonedata" => ZONEDATA,
        _ => return None,
    };
    Some(components)
}

/// System routines: name and return type (`None` for procedures).
pub const BUILTIN_ROUTINES: &[(&str, Option<&str>)] = &[
    // Procedures
    ("TPWrite", None),
    ("TPErase", None),
    ("WaitTime", None),
    ("WaitDI", None),
    ("WaitUntil", None),
    ("SetDO", None),
    ("Set", None),
    ("Reset", None),
    ("PulseDO", None),
    ("SetAO", None),
    ("Stop", None),
    ("Exit", None),
    ("Break", None),
    ("ConfJ", None),
    ("ConfL", None),
    ("AccSet", None),
    ("VelSet", None),
    ("IDelete", None),
    ("ISignalDI", None),
    ("IEnable", None),
    ("IDisable", None),
    ("Incr", None),
    ("Decr", None),
    ("Add", None),
    // Functions
    ("Abs", Some(NUM)),
    ("Sqrt", Some(NUM)),
    ("Sin", Some(NUM)),
    ("Cos", Some(NUM)),
    ("Tan", Some(NUM)),
    ("ATan2", Some(NUM)),
    ("Round", Some(NUM)),
    ("Trunc", Some(NUM)),
    ("Dim", Some(NUM)),
    ("StrLen", Some(NUM)),
    ("DInput", Some(NUM)),
    ("DOutput", Some(NUM)),
    ("Present", Some(BOOL)),
    ("NumToStr", Some(STRING)),
    ("ValToStr", Some(STRING)),
    ("StrPart", Some(STRING)),
    ("Offs", Some("robtarget")),
    ("RelTool", Some("robtarget")),
    ("CRobT", Some("robtarget")),
    ("CJointT", Some("jointtarget")),
    ("CPos", Some("pos")),
];

/// Predefined system data available in every module.
pub const PREDEFINED_DATA: &[(&str, &str)] = &[
    ("v5", "speeddata"),
    ("v10", "speeddata"),
    ("v20", "speeddata"),
    ("v50", "speeddata"),
    ("v100", "speeddata"),
    ("v150", "speeddata"),
    ("v200", "speeddata"),
    ("v300", "speeddata"),
    ("v500", "speeddata"),
    ("v1000", "speeddata"),
    ("v2000", "speeddata"),
    ("v5000", "speeddata"),
    ("vmax", "speeddata"),
    ("fine", "zonedata"),
    ("z0", "zonedata"),
    ("z1", "zonedata"),
    ("z5", "zonedata"),
    ("z10", "zonedata"),
    ("z20", "zonedata"),
    ("z50", "zonedata"),
    ("z100", "zonedata"),
    ("z200", "zonedata"),
    ("tool0", "tooldata"),
    ("wobj0", "wobjdata"),
    ("load0", "loaddata"),
];
