//! Core library types every compilation starts with.

use crate::types::*;

fn iface(name: &str, args: Vec<TypeSymbol>) -> TypeSymbol {
    TypeSymbol::generic(name, TypeKind::Interface, args)
}

fn t() -> TypeSymbol {
    TypeSymbol::type_parameter("T")
}

fn comparable() -> TypeSymbol {
    TypeSymbol::named("System.IComparable", TypeKind::Interface)
}

fn primitive(special: SpecialType) -> TypeDefinition {
    let symbol = TypeSymbol::special(special);
    TypeDefinition::structure(special.metadata_name())
        .implements(comparable())
        .implements(iface(
            "System.IComparable`1",
            vec![symbol.clone()],
        ))
        .implements(iface(EQUATABLE, vec![symbol]))
}

pub(crate) fn definitions() -> Vec<TypeDefinition> {
    let mut defs = vec![
        TypeDefinition::class(OBJECT),
        TypeDefinition::class(VALUE_TYPE).with_base(TypeSymbol::object()),
        TypeDefinition::class(ENUM)
            .with_base(TypeSymbol::named(VALUE_TYPE, TypeKind::Class))
            .implements(comparable()),
        TypeDefinition::class(STRING)
            .sealed()
            .implements(TypeSymbol::enumerable_of(TypeSymbol::char()))
            .implements(comparable())
            .implements(iface(EQUATABLE, vec![TypeSymbol::string()]))
            .property("Length", TypeSymbol::int32()),
        TypeDefinition::class(ARRAY)
            .implements(TypeSymbol::enumerable())
            .property("Length", TypeSymbol::int32())
            .property("LongLength", TypeSymbol::int64()),
        TypeDefinition::interface("System.IComparable"),
        TypeDefinition::interface("System.IComparable`1").generic(&["T"]),
        TypeDefinition::interface(EQUATABLE).generic(&["T"]),
        TypeDefinition::interface(ENUMERABLE),
        TypeDefinition::interface(GENERIC_ENUMERABLE)
            .generic(&["T"])
            .implements(TypeSymbol::enumerable()),
        TypeDefinition::interface(GENERIC_COLLECTION)
            .generic(&["T"])
            .implements(TypeSymbol::enumerable_of(t()))
            .property("Count", TypeSymbol::int32()),
        TypeDefinition::interface(GENERIC_LIST)
            .generic(&["T"])
            .implements(iface(GENERIC_COLLECTION, vec![t()])),
        TypeDefinition::interface(READ_ONLY_COLLECTION)
            .generic(&["T"])
            .implements(TypeSymbol::enumerable_of(t()))
            .property("Count", TypeSymbol::int32()),
        TypeDefinition::interface(READ_ONLY_LIST)
            .generic(&["T"])
            .implements(iface(READ_ONLY_COLLECTION, vec![t()])),
        TypeDefinition::class(LIST)
            .generic(&["T"])
            .implements(iface(GENERIC_LIST, vec![t()]))
            .implements(iface(READ_ONLY_LIST, vec![t()]))
            .property("Count", TypeSymbol::int32())
            .property("Capacity", TypeSymbol::int32()),
        TypeDefinition::class("System.Collections.Generic.HashSet`1")
            .generic(&["T"])
            .implements(iface(GENERIC_COLLECTION, vec![t()]))
            .implements(iface(READ_ONLY_COLLECTION, vec![t()]))
            .property("Count", TypeSymbol::int32()),
        TypeDefinition::structure(KEY_VALUE_PAIR)
            .generic(&["TKey", "TValue"])
            .property("Key", TypeSymbol::type_parameter("TKey"))
            .property("Value", TypeSymbol::type_parameter("TValue")),
        TypeDefinition::structure(NULLABLE)
            .generic(&["T"])
            .property("HasValue", TypeSymbol::boolean())
            .property("Value", t()),
        TypeDefinition::structure("System.ValueTuple`2")
            .generic(&["T1", "T2"])
            .implements(comparable()),
        TypeDefinition::class("System.Tuple`2")
            .generic(&["T1", "T2"])
            .implements(comparable())
            .property("Item1", TypeSymbol::type_parameter("T1"))
            .property("Item2", TypeSymbol::type_parameter("T2")),
        TypeDefinition::structure(DATE_TIME)
            .implements(comparable())
            .property("Ticks", TypeSymbol::int64()),
        TypeDefinition::structure(DATE_TIME_OFFSET)
            .implements(comparable())
            .property("Ticks", TypeSymbol::int64()),
        TypeDefinition::structure(TIME_SPAN)
            .implements(comparable())
            .property("Ticks", TypeSymbol::int64()),
        TypeDefinition::structure("System.Guid").implements(comparable()),
        TypeDefinition::class("System.Exception")
            .property("Message", TypeSymbol::string())
            .property(
                "InnerException",
                TypeSymbol::named("System.Exception", TypeKind::Class),
            ),
        TypeDefinition::class("System.Text.RegularExpressions.Regex"),
    ];

    let mut dictionary = TypeDefinition::class("System.Collections.Generic.Dictionary`2")
        .generic(&["TKey", "TValue"])
        .property("Count", TypeSymbol::int32());
    let pair = TypeSymbol::generic(
        KEY_VALUE_PAIR,
        TypeKind::Struct,
        vec![
            TypeSymbol::type_parameter("TKey"),
            TypeSymbol::type_parameter("TValue"),
        ],
    );
    dictionary = dictionary
        .implements(iface(GENERIC_COLLECTION, vec![pair.clone()]))
        .implements(iface(READ_ONLY_COLLECTION, vec![pair]));
    defs.push(dictionary);

    for special in [
        SpecialType::Boolean,
        SpecialType::Char,
        SpecialType::SByte,
        SpecialType::Byte,
        SpecialType::Int16,
        SpecialType::UInt16,
        SpecialType::Int32,
        SpecialType::UInt32,
        SpecialType::Int64,
        SpecialType::UInt64,
        SpecialType::Single,
        SpecialType::Double,
        SpecialType::Decimal,
    ] {
        defs.push(primitive(special));
    }
    defs
}
