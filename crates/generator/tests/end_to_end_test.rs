//! End-to-end generation scenarios over small, representative Discovery
//! documents — one test per scenario rather than a mechanical round-trip
//! grid.

use discoverygen_codegen::Generator;
use discoverygen_parser::discovery::DiscoveryParser;

fn generate(json: &str, self_url: &str) -> String {
    let parser = DiscoveryParser::from_json(json, self_url).expect("parse");
    let generator = Generator::new(parser.doc().clone(), parser.primary_name().to_string(), parser.self_url().to_string());
    generator.generate().expect("generate")
}

#[test]
fn minimal_api_has_empty_class_and_no_types() {
    let out = generate(
        r#"{"id":"mini:v1","name":"mini","title":"Mini API","rootUrl":"https://mini/","resources":{},"schemas":{}}"#,
        "https://self/mini:v1.ts",
    );
    assert!(out.contains("export class Mini {"));
    assert!(out.contains("constructor(client?: CredentialsClient, baseUrl: string = \"https://mini/\") {"));
    assert!(!out.contains("export interface"));
    assert!(!out.contains("serialize"));
    assert!(!out.contains("async "));
}

#[test]
fn single_method_with_no_params_has_no_codecs() {
    let out = generate(
        r#"{
            "name": "things", "title": "Things API", "rootUrl": "https://things/",
            "schemas": {
                "ThingList": {"id": "ThingList", "type": "object", "properties": {"count": {"type": "integer"}}}
            },
            "resources": {
                "things": {
                    "methods": {
                        "list": {"httpMethod": "GET", "path": "things", "response": {"$ref": "ThingList"}}
                    }
                }
            }
        }"#,
        "https://self/things:v1.ts",
    );
    assert!(out.contains("async thingsList(): Promise<ThingList> {"));
    assert!(out.contains("const url = new URL(`${this.#baseUrl}things`);"));
    assert!(out.contains("request(url.href, { client: this.#client, method: \"GET\" });"));
    assert!(out.contains("return data as ThingList;"));
    assert!(!out.contains("serializeThingList"));
    assert!(!out.contains("deserializeThingList"));
}

#[test]
fn int64_field_round_trips_through_bigint() {
    let out = generate(
        r#"{
            "name": "bank", "title": "Bank API", "rootUrl": "https://bank/",
            "schemas": {
                "Balance": {
                    "id": "Balance", "type": "object",
                    "properties": {"amount": {"type": "string", "format": "int64", "required": true}}
                }
            }
        }"#,
        "https://self/bank:v1.ts",
    );
    assert!(out.contains("export function serializeBalance"));
    assert!(out.contains("export function deserializeBalance"));
    assert!(out.contains("String(data.amount)"));
    assert!(out.contains("BigInt(data.amount)"));
}

#[test]
fn recursive_schema_generates_without_looping() {
    let out = generate(
        r#"{
            "name": "tree", "title": "Tree API", "rootUrl": "https://tree/",
            "schemas": {
                "Node": {
                    "id": "Node", "type": "object",
                    "properties": {"child": {"$ref": "Node"}}
                }
            }
        }"#,
        "https://self/tree:v1.ts",
    );
    assert!(out.contains("export function serializeNode"));
    assert!(out.contains("export function deserializeNode"));
    assert_eq!(out.matches("export function serializeNode").count(), 1);
}

#[test]
fn path_template_and_sorted_query_options() {
    let out = generate(
        r#"{
            "name": "things", "title": "Things API", "rootUrl": "https://things/",
            "resources": {
                "things": {
                    "methods": {
                        "get": {
                            "httpMethod": "GET",
                            "path": "things/{+thingId}",
                            "parameters": {
                                "thingId": {"type": "string", "location": "path", "required": true},
                                "pageSize": {"type": "integer", "location": "query"},
                                "filter": {"type": "string", "location": "query"}
                            }
                        }
                    }
                }
            }
        }"#,
        "https://self/things:v1.ts",
    );
    assert!(out.contains("async thingsGet(thingId: string, opts: ThingsGetOptions = {}): Promise<void> {"));
    assert!(out.contains("const url = new URL(`${this.#baseUrl}things/${thingId}`);"));
    assert!(out.contains("export interface ThingsGetOptions {"));

    let filter_pos = out.find("if (opts.filter !== undefined)").expect("filter guard");
    let page_size_pos = out.find("if (opts.pageSize !== undefined)").expect("pageSize guard");
    assert!(filter_pos < page_size_pos, "query guards should be emitted in sorted order");
}

#[test]
fn primary_class_name_is_case_corrected() {
    let out = generate(
        r#"{"name":"bigquery","title":"BigQuery API","rootUrl":"https://bigquery/"}"#,
        "https://self/bigquery:v2.ts",
    );
    assert!(out.contains("export class BigQuery {"));
}

#[test]
fn duration_and_fieldmask_only_schema_still_gets_identity_codec() {
    let out = generate(
        r#"{
            "name": "jobs", "title": "Jobs API", "rootUrl": "https://jobs/",
            "schemas": {
                "Timeout": {
                    "id": "Timeout", "type": "object",
                    "properties": {
                        "limit": {"type": "string", "format": "google-duration", "required": true},
                        "mask": {"type": "string", "format": "google-fieldmask", "required": true}
                    }
                }
            }
        }"#,
        "https://self/jobs:v1.ts",
    );
    assert!(out.contains("export function serializeTimeout"));
    assert!(out.contains("export function deserializeTimeout"));
    assert!(out.contains("limit: data.limit"));
    assert!(out.contains("mask: data.mask"));
}

#[test]
fn dotted_property_names_are_emitted_bracketed() {
    let out = generate(
        r#"{
            "name": "weird", "title": "Weird API", "rootUrl": "https://weird/",
            "schemas": {
                "Thing": {
                    "id": "Thing", "type": "object",
                    "properties": {"weird.name": {"type": "string", "format": "int64", "required": true}}
                }
            }
        }"#,
        "https://self/weird:v1.ts",
    );
    assert!(out.contains("\"weird.name\": bigint;"));
    assert!(out.contains("data[\"weird.name\"]"));
}
