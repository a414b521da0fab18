//! Rule sets for each validated payload.

use super::{FieldRule, FieldType, RuleSet, ShapeCheck};

const STREET: FieldRule = FieldRule::required("street", FieldType::String)
    .with_shape(ShapeCheck::NonEmpty, "Rua não pode ser vazio");
const ADDRESS_NUMBER: FieldRule = FieldRule::required("addressNumber", FieldType::String)
    .with_shape(ShapeCheck::NonEmpty, "Número não pode ser vazio");
const ZIP_CODE: FieldRule = FieldRule::required("zipCode", FieldType::String).with_shape(
    ShapeCheck::ExactLength(8),
    "Deve ser informado um CEP válido (ex: 99884433)",
);
const COMPLEMENT: FieldRule = FieldRule::optional("complement", FieldType::String);
const NEIGHBORHOOD: FieldRule = FieldRule::required("neighborhood", FieldType::String)
    .with_shape(ShapeCheck::NonEmpty, "Bairro não pode ser vazio");
const CITY: FieldRule = FieldRule::required("city", FieldType::String)
    .with_shape(ShapeCheck::NonEmpty, "Cidade não pode ser vazio");
const UF: FieldRule = FieldRule::required("uf", FieldType::String).with_shape(
    ShapeCheck::ExactLength(2),
    "Deve ser informado uma UF válida (ex: RS)",
);

/// Address payloads. Update requests reuse the same rules in update mode.
pub const ADDRESS_RULES: RuleSet = RuleSet::new(&[
    STREET,
    ADDRESS_NUMBER,
    ZIP_CODE,
    COMPLEMENT,
    NEIGHBORHOOD,
    CITY,
    UF,
]);

const NAME: FieldRule = FieldRule::required("name", FieldType::String)
    .with_shape(ShapeCheck::NonEmpty, "Nome não pode ser vazio");
const AGE: FieldRule = FieldRule::required("age", FieldType::Integer).with_shape(
    ShapeCheck::NonNegative,
    "Idade deve ser um número inteiro positivo",
);
const PASSWORD: FieldRule = FieldRule::required("password", FieldType::String)
    .with_shape(ShapeCheck::NonEmpty, "Senha não pode ser vazia");

/// Student creation payloads.
pub const STUDENT_CREATE_RULES: RuleSet = RuleSet::new(&[
    NAME,
    AGE,
    FieldRule::required("document", FieldType::String)
        .with_shape(ShapeCheck::NonEmpty, "Documento não pode ser vazio"),
    FieldRule::required("email", FieldType::String)
        .with_shape(ShapeCheck::Email, "Deve ser informado um e-mail válido"),
    PASSWORD,
]);

/// Student update payloads; only name and age may change.
pub const STUDENT_UPDATE_RULES: RuleSet = RuleSet::new(&[NAME, AGE]);

/// Login payloads.
pub const LOGIN_RULES: RuleSet = RuleSet::new(&[
    FieldRule::required("email", FieldType::String)
        .with_shape(ShapeCheck::NonEmpty, "E-mail não pode ser vazio"),
    PASSWORD,
]);
