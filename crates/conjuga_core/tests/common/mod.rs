#![allow(dead_code)]

use conjuga_core::{parse_catalog, CatalogRecord};
use serde_json::{json, Value};

pub fn records(value: Value) -> Vec<CatalogRecord> {
    let parsed = parse_catalog(&value.to_string()).expect("fixture parses");
    assert!(parsed.issues.is_empty(), "fixture issues: {:?}", parsed.issues);
    parsed.records
}

fn finite(mood: &str, tense: &str, person: &str, value: &str) -> Value {
    json!({ "mood": mood, "tense": tense, "person": person, "value": value })
}

fn with_vos(mut form: Value, vos: &str) -> Value {
    form["accepts"] = json!({ "vos": vos });
    form
}

pub fn primary() -> Vec<CatalogRecord> {
    records(json!([
        {
            "id": "es-sacar",
            "lemma": "sacar",
            "type": "regular",
            "paradigms": [{
                "regionTags": ["rioplatense", "la_general"],
                "forms": [
                    finite("indicative", "pretIndef", "1s", "saqué"),
                    finite("indicative", "pretIndef", "3s", "sacó"),
                    with_vos(finite("indicative", "pres", "2s_tu", "sacas"), "sacás"),
                    with_vos(finite("imperative", "impAff", "2s_tu", "saca"), "sacá"),
                    { "mood": "nonfinite", "tense": "inf", "person": "", "value": "sacar" }
                ]
            }]
        },
        {
            "id": "es-cerrar",
            "lemma": "cerrar",
            "type": "irregular",
            "paradigms": [{
                "regionTags": ["rioplatense"],
                "forms": [
                    finite("indicative", "pres", "1s", "cierro"),
                    with_vos(finite("indicative", "pres", "2s_tu", "cierras"), "cerrás"),
                    with_vos(finite("subjunctive", "subjPres", "2s_tu", "cierres"), "cierres"),
                    finite("imperative", "impNeg", "2s_tu", "no cierres")
                ]
            }],
            "irregularityMatrix": { "pres": true, "subjPres": true, "pretIndef": false }
        },
        {
            "id": "es-coger",
            "lemma": "coger",
            "type": "irregular",
            "paradigms": [{
                "regionTags": ["peninsular"],
                "forms": [
                    finite("indicative", "pres", "1s", "cojo"),
                    finite("indicative", "pres", "2p_vosotros", "cogéis")
                ]
            }]
        },
        {
            "id": "es-abolir",
            "lemma": "abolir",
            "type": "irregular",
            "paradigms": [{
                "regionTags": ["la_general", "rioplatense", "peninsular"],
                "forms": [
                    finite("indicative", "pres", "1p", "abolimos"),
                    finite("indicative", "pretIndef", "1s", "abolí"),
                    { "mood": "nonfinite", "tense": "ger", "person": "", "value": "aboliendo" }
                ]
            }]
        },
        {
            "id": "es-vivir",
            "lemma": "vivir",
            "type": "regular",
            "paradigms": [
                {
                    "regionTags": ["la_general", "peninsular"],
                    "forms": [
                        finite("indicative", "pres", "2s_tu", "vives"),
                        finite("indicative", "fut", "1s", "viviré")
                    ]
                },
                {
                    "regionTags": ["rioplatense"],
                    "forms": [
                        finite("indicative", "pres", "2s_vos", "vivís"),
                        with_vos(finite("indicative", "pres", "2s_tu", "vives"), "vivís")
                    ]
                }
            ]
        }
    ]))
}

pub fn supplementary_auto() -> Vec<CatalogRecord> {
    records(json!([
        {
            "id": "auto-cerrar",
            "lemma": "cerrar",
            "type": "regular",
            "paradigms": [{
                "regionTags": ["rioplatense", "peninsular"],
                "forms": [finite("indicative", "pres", "1s", "cerro")]
            }]
        },
        {
            "id": "auto-agredir",
            "lemma": "agredir",
            "infinitive": "agredir",
            "irregularityMatrix": { "pres": false }
        }
    ]))
}

pub fn supplementary_extra() -> Vec<CatalogRecord> {
    records(json!([
        {
            "id": "extra-agredir",
            "lemma": "agredir",
            "type": "regular",
            "paradigms": [{
                "regionTags": ["la_general"],
                "forms": [finite("indicative", "pres", "3s", "agrede")]
            }]
        },
        {
            "id": "extra-salir",
            "lemma": "salir",
            "type": "irregular",
            "paradigms": [{
                "regionTags": ["la_general", "rioplatense"],
                "forms": [
                    finite("indicative", "pres", "1s", "salgo"),
                    with_vos(finite("imperative", "impAff", "2s_tu", "sal"), "salí")
                ]
            }]
        }
    ]))
}

pub fn supplementary() -> Vec<Vec<CatalogRecord>> {
    vec![supplementary_auto(), supplementary_extra()]
}
