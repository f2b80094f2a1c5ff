//! End-to-end stub generation over synthetic modules.

mod common;

use common::*;
use harmonygen::prelude::*;

/// A module with the shapes the generator distinguishes.
fn game_module() -> ImageBuilder {
    let mut image = ImageBuilder::new().with_module_name("Game.dll");
    let int = vec![sig::I4];
    let void = vec![sig::VOID];

    image.add_type(
        TypeDefBuilder::new("N", "C").with_method(
            MethodDefBuilder::new("Compute", sig::method(false, &int, &[int.clone()]))
                .with_flags(METHOD_STATIC)
                .with_param("x"),
        ),
    );

    let player_sig = sig::class_def(image.next_type());
    image.add_type(
        TypeDefBuilder::new("Game", "Player")
            .with_method(
                MethodDefBuilder::new("get_Health", sig::method(true, &int, &[]))
                    .with_flags(METHOD_SPECIAL),
            )
            .with_method(
                MethodDefBuilder::new("set_Health", sig::method(true, &void, &[int.clone()]))
                    .with_flags(METHOD_SPECIAL)
                    .with_param("value"),
            )
            .with_method(
                MethodDefBuilder::new(".ctor", sig::method(true, &void, &[]))
                    .with_flags(METHOD_SPECIAL),
            )
            .with_method(
                MethodDefBuilder::new("Attack", sig::method(true, &[sig::BOOLEAN], &[player_sig]))
                    .with_param("object"),
            )
            .with_property("Health", sig::property(true, &int), Some(0), Some(1)),
    );

    let boxed = image.add_type(
        TypeDefBuilder::new("Game", "Box`1")
            .with_generic_parameters(&["T"])
            .with_method(MethodDefBuilder::new("Get", sig::method(true, &sig::var(0), &[]))),
    );
    image.add_nested_type(
        boxed,
        TypeDefBuilder::new("", "Inner")
            .with_method(MethodDefBuilder::new("Run", sig::method(true, &void, &[]))),
    );

    image.add_type(
        TypeDefBuilder::new("Game", "Extensions").with_method(
            MethodDefBuilder::new("Twice", sig::method(false, &int, &[int.clone(), int.clone()]))
                .with_flags(METHOD_STATIC)
                .with_param("number")
                .with_param("times")
                .extension(),
        ),
    );

    let list = image.type_ref("System.Collections.Generic", "List`1");
    image.add_type(
        TypeDefBuilder::new("Game", "Util")
            .with_method(
                MethodDefBuilder::new(
                    "Wrap",
                    sig::generic_method(false, 1, &sig::mvar(0), &[sig::mvar(0)]),
                )
                .with_flags(METHOD_STATIC)
                .with_generic_parameters(&["TItem"])
                .with_param("item"),
            )
            .with_method(
                MethodDefBuilder::new(
                    "Sum",
                    sig::method(
                        false,
                        &int,
                        &[
                            sig::generic_inst(&sig::class_ref(list), &[int.clone()]),
                            sig::sz_array(&[sig::STRING]),
                        ],
                    ),
                )
                .with_flags(METHOD_STATIC)
                .with_param("items")
                .with_param("labels"),
            ),
    );

    image
}

fn stubs_at(rows: &[ReportRow], index: usize) -> &StubTriple {
    match &rows[index] {
        ReportRow::Stubs(stubs) => stubs,
        other => panic!("expected stubs, got {other:?}"),
    }
}

fn declaration(stub: &StubText) -> &str {
    stub.lines()
        .iter()
        .find(|line| line.starts_with("private static "))
        .expect("stub declaration")
}

#[test]
fn static_method_stubs() {
    let (rows, _) = generate_rows(game_module(), &["N.C"], Markup::Html);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], ReportRow::Header("N.C".to_string()));

    let stubs = stubs_at(&rows, 1);
    assert_eq!(
        stubs.prefix.lines(),
        [
            "[HarmonyPatch(typeof(N.C))]",
            "[HarmonyPatch(\"Compute\")]",
            "[HarmonyPatch(new Type[] { typeof(int) })]",
            "[HarmonyPrefix]",
            "private static void ComputePrefix(int x)",
            "{",
            "    Logger.LogInfo(\"Autogenerated prefix stub for static int N.C.Compute(int x)\");",
            "}",
        ]
    );
    assert_eq!(
        declaration(&stubs.replacement),
        "private static bool ComputeReplacement(ref int __result, ref int x)"
    );
    assert_eq!(
        stubs.replacement.lines()[7],
        "    return true; // Run the original method."
    );
    assert_eq!(
        declaration(&stubs.postfix),
        "private static void ComputePostfix(int x)"
    );
}

#[test]
fn methods_then_property_accessors() {
    let (rows, _) = generate_rows(game_module(), &["player"], Markup::Html);
    assert_eq!(
        stub_names(&rows),
        [
            "# Game.Player",
            "ConstructorPrefix",
            "AttackPrefix",
            "HealthGetterPrefix",
            "HealthSetterPrefix"
        ]
    );

    let constructor = stubs_at(&rows, 1);
    assert_eq!(constructor.prefix.lines()[1], "[HarmonyPatch(MethodType.Constructor)]");
    assert_eq!(
        declaration(&constructor.prefix),
        "private static void ConstructorPrefix(Game.Player __instance)"
    );

    let attack = stubs_at(&rows, 2);
    assert_eq!(
        declaration(&attack.replacement),
        "private static bool AttackReplacement(ref bool __result, Game.Player __instance, ref Game.Player @object)"
    );

    let getter = stubs_at(&rows, 3);
    assert_eq!(
        getter.prefix.lines()[1],
        "[HarmonyPatch(\"Health\", MethodType.Getter)]"
    );
    assert_eq!(
        declaration(&getter.replacement),
        "private static bool HealthGetterReplacement(ref int __result, Game.Player __instance)"
    );

    let setter = stubs_at(&rows, 4);
    assert_eq!(
        declaration(&setter.replacement),
        "private static bool HealthSetterReplacement(Game.Player __instance, ref int value)"
    );
    assert_eq!(
        setter.postfix.lines()[2],
        "[HarmonyPatch(new Type[] { typeof(int) })]"
    );
}

#[test]
fn extension_methods_keep_their_receiver() {
    let (rows, _) = generate_rows(game_module(), &["Extensions"], Markup::Html);
    let stubs = stubs_at(&rows, 1);

    assert_eq!(
        declaration(&stubs.replacement),
        "private static bool TwiceReplacement(ref int __result, int number, ref int times)"
    );
    assert!(stubs.prefix.lines().contains(
        &"    Logger.LogInfo(\"Autogenerated prefix stub for static int Game.Extensions.Twice(this int number, int times)\");"
            .to_string()
    ));
}

#[test]
fn generic_types_and_methods_produce_no_rows() {
    let (rows, registry) = generate_rows(game_module(), &["Game"], Markup::Html);
    assert_eq!(
        stub_names(&rows),
        [
            "# Game.Player",
            "ConstructorPrefix",
            "AttackPrefix",
            "HealthGetterPrefix",
            "HealthSetterPrefix",
            "# Game.Extensions",
            "TwicePrefix",
            "# Game.Util",
            "SumPrefix"
        ]
    );

    assert!(registry.contains("Game.Box`1"));
    assert!(!registry.contains("Game.Box`1/Inner"));
}

#[test]
fn html_markup_escapes_generic_instances() {
    let (rows, registry) = generate_rows(game_module(), &["Util"], Markup::Html);
    let sum = stubs_at(&rows, 1);

    assert_eq!(
        declaration(&sum.prefix),
        "private static void SumPrefix(System.Collections.Generic.List&lt;System.Int32&gt; items, string[] labels)"
    );
    assert!(registry.contains("System.Collections.Generic.List`1<System.Int32>"));
    assert!(registry.contains("System.String[]"));
    assert!(registry.contains("System.String"));

    let (rows, _) = generate_rows(game_module(), &["Util"], Markup::Plain);
    assert_eq!(
        declaration(&stubs_at(&rows, 1).prefix),
        "private static void SumPrefix(System.Collections.Generic.List<System.Int32> items, string[] labels)"
    );
}

#[test]
fn empty_filter_selects_every_type() {
    let (rows, registry) = generate_rows(game_module(), &[], Markup::Plain);
    let headers = rows
        .iter()
        .filter_map(|row| match row {
            ReportRow::Header(name) => Some(name.as_str()),
            ReportRow::Stubs(_) => None,
        })
        .collect::<Vec<_>>();

    assert_eq!(
        headers,
        ["<Module>", "N.C", "Game.Player", "Game.Extensions", "Game.Util"]
    );
    assert!(registry.contains("<Module>"));
}

#[test]
fn registry_is_shared_across_modules() {
    let mut registry = TypeRegistry::new();
    let filter = TypeFilter::new(["N.C"]);

    let first = CilModule::from_mem(game_module().build()).unwrap();
    let rows = generate(&first, &filter, &mut registry, Markup::Html);
    assert_eq!(rows.len(), 2);
    let seen = registry.len();

    let second = CilModule::from_mem(game_module().with_module_name("Other.dll").build()).unwrap();
    assert_eq!(second.name(), "Other.dll");
    let rows = generate(&second, &filter, &mut registry, Markup::Html);
    assert_eq!(rows.len(), 2);
    assert_eq!(registry.len(), seen);
}
