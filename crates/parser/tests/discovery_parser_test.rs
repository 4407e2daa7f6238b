//! Integration test for the Discovery parser against a (trimmed) real
//! Google Cloud Storage Discovery document.

use discoverygen_parser::discovery::DiscoveryParser;

#[test]
fn test_parse_gcs_discovery() {
    let discovery_json = r##"{
        "discoveryVersion": "v1",
        "name": "storage",
        "version": "v1",
        "title": "Cloud Storage JSON API",
        "description": "Stores and retrieves potentially large, immutable data objects.",
        "rootUrl": "https://storage.googleapis.com/",
        "servicePath": "storage/v1/",
        "schemas": {
            "Bucket": {
                "id": "Bucket",
                "type": "object",
                "description": "A bucket resource",
                "properties": {
                    "id": { "type": "string", "description": "The ID of the bucket" },
                    "name": { "type": "string", "description": "The name of the bucket", "required": true },
                    "location": { "type": "string", "description": "The location of the bucket" },
                    "storageClass": { "type": "string", "description": "The storage class of the bucket" }
                }
            }
        },
        "resources": {
            "buckets": {
                "methods": {
                    "insert": {
                        "id": "storage.buckets.insert",
                        "path": "b",
                        "httpMethod": "POST",
                        "description": "Creates a new bucket",
                        "parameters": {
                            "project": { "type": "string", "description": "A valid API project identifier", "required": true, "location": "query" }
                        },
                        "request": { "$ref": "Bucket" },
                        "response": { "$ref": "Bucket" }
                    },
                    "get": {
                        "id": "storage.buckets.get",
                        "path": "b/{bucket}",
                        "httpMethod": "GET",
                        "description": "Returns metadata for the specified bucket",
                        "parameters": {
                            "bucket": { "type": "string", "description": "Name of a bucket", "required": true, "location": "path" }
                        },
                        "response": { "$ref": "Bucket" }
                    },
                    "delete": {
                        "id": "storage.buckets.delete",
                        "path": "b/{bucket}",
                        "httpMethod": "DELETE",
                        "description": "Permanently deletes an empty bucket",
                        "parameters": {
                            "bucket": { "type": "string", "description": "Name of a bucket", "required": true, "location": "path" }
                        }
                    },
                    "patch": {
                        "id": "storage.buckets.patch",
                        "path": "b/{bucket}",
                        "httpMethod": "PATCH",
                        "description": "Updates a bucket",
                        "parameters": {
                            "bucket": { "type": "string", "description": "Name of a bucket", "required": true, "location": "path" }
                        },
                        "request": { "$ref": "Bucket" },
                        "response": { "$ref": "Bucket" }
                    }
                }
            }
        }
    }"##;

    let parser =
        DiscoveryParser::from_json(discovery_json, "https://self/storage:v1.ts").unwrap();

    assert_eq!(parser.doc().name, "storage");
    assert_eq!(parser.primary_name(), "Storage");

    let records = parser.flatten().unwrap();
    assert_eq!(records.len(), 4, "insert, get, delete, patch");

    let names: Vec<&str> = records.iter().map(|r| r.camel_case_name.as_str()).collect();
    assert_eq!(names, vec!["bucketsDelete", "bucketsGet", "bucketsInsert", "bucketsPatch"]);

    let get = records.iter().find(|r| r.camel_case_name == "bucketsGet").unwrap();
    assert_eq!(get.path_params.len(), 1);
    assert_eq!(get.path_params[0].0, "bucket");
    assert_eq!(get.response.as_deref(), Some("Bucket"));

    let insert = records.iter().find(|r| r.camel_case_name == "bucketsInsert").unwrap();
    assert_eq!(insert.request.as_deref(), Some("Bucket"));
    assert_eq!(insert.query_params.len(), 1);
    assert_eq!(insert.query_params[0].0, "project");
}
