use super::{CompositeShape, EnumShape, PrimitiveKind, TypeDescriptor};

#[test]
fn builder_keeps_registration_order() {
	let TypeDescriptor::Composite(shape) = CompositeShape::builder("Order")
		.field("zeta", PrimitiveKind::I32)
		.field("alpha", TypeDescriptor::String)
		.field("mid", TypeDescriptor::Decimal)
		.build()
	else {
		panic!("expected composite");
	};

	let names: Vec<&str> = shape.fields.iter().map(|field| &*field.name).collect();
	assert_eq!(names, ["zeta", "alpha", "mid"]);
	assert_eq!(shape.field("alpha").map(|field| &field.ty), Some(&TypeDescriptor::String));
}

#[test]
fn descriptor_names_follow_shape() {
	assert_eq!(TypeDescriptor::primitive(PrimitiveKind::U16).name(), "u16");
	assert_eq!(TypeDescriptor::enumeration("Color").name(), "Color");
	assert_eq!(CompositeShape::builder("Point").build().name(), "Point");
	assert_eq!(TypeDescriptor::Sequence(Box::new(TypeDescriptor::String)).name(), "sequence");
}

#[test]
fn only_floats_skip_varint() {
	assert!(PrimitiveKind::Char.is_varint());
	assert!(PrimitiveKind::Bool.is_varint());
	assert!(!PrimitiveKind::F32.is_varint());
	assert!(!PrimitiveKind::F64.is_varint());
}

#[test]
fn enum_members_label_without_restricting() {
	let shape = EnumShape::new("Level").member("Low", 0).member("High", 10);
	assert_eq!(shape.member_name(10), Some("High"));
	assert_eq!(shape.member_name(7), None);
}

#[test]
fn descriptor_loads_from_json_table() {
	let text = r#"{
		"composite": {
			"name": "Person",
			"fields": [
				{ "name": "id", "type": { "primitive": "i32" } },
				{ "name": "name", "type": "string" },
				{ "name": "mood", "type": { "enum": { "name": "Mood", "members": [{ "name": "Calm", "value": 1 }] } } }
			]
		}
	}"#;

	let parsed = TypeDescriptor::from_json(text).expect("descriptor parses");
	let expected = CompositeShape::builder("Person")
		.field("id", PrimitiveKind::I32)
		.field("name", TypeDescriptor::String)
		.field("mood", EnumShape::new("Mood").member("Calm", 1).build())
		.build();
	assert_eq!(parsed, expected);
}
