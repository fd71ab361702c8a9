#![allow(dead_code)]

use serde_json::json;

use hoshmarket_core::{CategoryAttributeSchema, CategoryDetailsSchema, FormValue, FormValueMap};

/// Attribute schema with three required fields (`6477`, `size`,
/// `features`), two optional ones, and the excluded id 2233.
pub fn attribute_schema() -> CategoryAttributeSchema {
    CategoryAttributeSchema::from_json(json!({
        "categoryGroupAttributes": {
            "1": {
                "title": "مشخصات اصلی",
                "attributes": {
                    "6477": {
                        "id": 6477,
                        "title": "رنگ",
                        "type": "select",
                        "required": true,
                        "values": {
                            "12": { "text": "قرمز", "code": "red" },
                            "13": { "text": "آبی", "code": "blue" }
                        },
                        "value": {}
                    },
                    "11": {
                        "id": 11,
                        "code": "size",
                        "title": "سایز",
                        "type": "checkbox",
                        "required": true,
                        "values": {
                            "s1": { "text": "کوچک" },
                            "s2": { "text": "بزرگ" }
                        }
                    },
                    "20": {
                        "id": 20,
                        "code": "features",
                        "title": "ویژگی‌ها",
                        "type": "multi_text",
                        "required": true
                    },
                    "2233": {
                        "id": 2233,
                        "title": "فیلد قدیمی",
                        "type": "input",
                        "required": true,
                        "value": "دست‌نخورده"
                    }
                }
            },
            "2": {
                "attributes": {
                    "21": {
                        "id": 21,
                        "title": "ظرفیت",
                        "type": "input",
                        "unit": "میلی‌لیتر"
                    },
                    "30": {
                        "id": 30,
                        "title": "توضیحات تکمیلی",
                        "type": "text"
                    }
                }
            }
        }
    }))
    .expect("fixture attribute schema is valid")
}

pub fn details_schema() -> CategoryDetailsSchema {
    CategoryDetailsSchema::from_json(json!({
        "bind": {
            "brands": [
                { "id": 5, "title": "سامسونگ" },
                { "id": 719, "title": "متفرقه" }
            ],
            "statuses": [{ "id": "new", "title": "نو" }],
            "fakeReasons": [{ "id": "r1", "title": "طرح مشابه" }],
            "generalMefa": { "3": { "title": "شناسه عمومی" } },
            "allowFake": true
        }
    }))
    .expect("fixture details schema is valid")
}

pub fn values(pairs: &[(&str, FormValue)]) -> FormValueMap {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

pub fn list(ids: &[&str]) -> FormValue {
    FormValue::List(ids.iter().map(|id| id.to_string()).collect())
}
