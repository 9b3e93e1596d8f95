//! Integration tests for resource planning over service models

use resource_planner_analyzer::{plan_service, ResourcePlanner};
use resource_planner_common::{PlanError, PlanOverrides, StatusChainEntry};
use resource_planner_parser::{ServiceModel, ServiceModelParser};
use serde_json::json;
use std::collections::HashMap;

fn model_from(value: serde_json::Value) -> ServiceModel {
    serde_json::from_value(value).expect("fixture should deserialize")
}

/// Small SageMaker-like catalog with clusters, training jobs and model package groups
fn sagemaker_model() -> ServiceModel {
    let json = r#"{
        "version": "2.0",
        "metadata": {
            "apiVersion": "2017-07-24",
            "endpointPrefix": "api.sagemaker",
            "serviceId": "SageMaker"
        },
        "operations": {
            "CreateCluster": {
                "name": "CreateCluster",
                "input": {"shape": "CreateClusterRequest"},
                "output": {"shape": "CreateClusterResponse"}
            },
            "DescribeCluster": {
                "name": "DescribeCluster",
                "input": {"shape": "DescribeClusterRequest"},
                "output": {"shape": "DescribeClusterResponse"}
            },
            "ListClusters": {
                "name": "ListClusters",
                "input": {"shape": "ListClustersRequest"},
                "output": {"shape": "ListClustersResponse"}
            },
            "DeleteCluster": {
                "name": "DeleteCluster",
                "input": {"shape": "DeleteClusterRequest"},
                "output": {"shape": "DeleteClusterResponse"}
            },
            "CreateTrainingJob": {
                "name": "CreateTrainingJob",
                "input": {"shape": "CreateTrainingJobRequest"},
                "output": {"shape": "CreateTrainingJobResponse"}
            },
            "DescribeTrainingJob": {
                "name": "DescribeTrainingJob",
                "input": {"shape": "DescribeTrainingJobRequest"},
                "output": {"shape": "DescribeTrainingJobResponse"}
            },
            "StopTrainingJob": {
                "name": "StopTrainingJob",
                "input": {"shape": "StopTrainingJobRequest"}
            },
            "CreateModelPackageGroup": {
                "name": "CreateModelPackageGroup",
                "input": {"shape": "CreateModelPackageGroupInput"},
                "output": {"shape": "CreateModelPackageGroupOutput"}
            },
            "DeleteModelPackageGroupPolicy": {
                "name": "DeleteModelPackageGroupPolicy",
                "input": {"shape": "DeleteModelPackageGroupPolicyInput"}
            },
            "Search": {
                "name": "Search",
                "input": {"shape": "SearchRequest"},
                "output": {"shape": "SearchResponse"}
            }
        },
        "shapes": {
            "CreateClusterRequest": {
                "type": "structure",
                "members": {
                    "ClusterName": {"shape": "ClusterName"},
                    "InstanceGroups": {"shape": "InstanceGroups"}
                }
            },
            "CreateClusterResponse": {
                "type": "structure",
                "members": {"ClusterArn": {"shape": "String"}}
            },
            "DescribeClusterRequest": {
                "type": "structure",
                "members": {"ClusterName": {"shape": "ClusterName"}}
            },
            "DescribeClusterResponse": {
                "type": "structure",
                "members": {
                    "ClusterArn": {"shape": "String"},
                    "ClusterStatus": {"shape": "ClusterStatus"},
                    "FailureMessage": {"shape": "String"}
                }
            },
            "ClusterStatus": {
                "type": "string",
                "enum": ["Creating", "Deleting", "Failed", "InService", "RollingBack"]
            },
            "CreateTrainingJobRequest": {
                "type": "structure",
                "members": {
                    "TrainingJobName": {"shape": "TrainingJobName"},
                    "ClusterName": {"shape": "ClusterName"},
                    "RoleArn": {"shape": "String"}
                }
            },
            "CreateTrainingJobResponse": {
                "type": "structure",
                "members": {"TrainingJobArn": {"shape": "String"}}
            },
            "DescribeTrainingJobRequest": {
                "type": "structure",
                "members": {"TrainingJobName": {"shape": "TrainingJobName"}}
            },
            "DescribeTrainingJobResponse": {
                "type": "structure",
                "members": {
                    "TrainingJobName": {"shape": "TrainingJobName"},
                    "TrainingJobStatus": {"shape": "TrainingJobStatus"}
                }
            },
            "TrainingJobStatus": {
                "type": "string",
                "enum": ["InProgress", "Completed", "Failed", "Stopping", "Stopped", "InService"]
            },
            "CreateModelPackageGroupInput": {
                "type": "structure",
                "members": {
                    "ModelPackageGroupName": {"shape": "EntityName"},
                    "ModelPackageGroupDescription": {"shape": "String"}
                }
            },
            "CreateModelPackageGroupOutput": {
                "type": "structure",
                "members": {"ModelPackageGroupArn": {"shape": "String"}}
            },
            "ClusterName": {"type": "string"},
            "TrainingJobName": {"type": "string"},
            "EntityName": {"type": "string"},
            "String": {"type": "string"},
            "InstanceGroups": {"type": "list", "member": {"shape": "String"}}
        }
    }"#;

    ServiceModelParser::from_json(json)
        .expect("fixture should parse")
        .into_model()
}

#[test]
fn test_cluster_end_to_end() {
    let model = sagemaker_model();
    let plan = plan_service(&model).unwrap();
    let cluster = plan.resource("Cluster").expect("Cluster should be planned");

    assert_eq!(cluster.resource_type, "resource");
    assert_eq!(cluster.class_methods, vec!["create", "get", "list"]);
    assert_eq!(
        cluster.object_methods,
        vec!["delete", "refresh", "wait_for_status"]
    );
    assert!(cluster.resource_states.contains(&"InService".to_string()));
    assert_eq!(
        cluster.resource_status_chain,
        vec![StatusChainEntry::new("ClusterStatus", "ClusterStatus")]
    );
    assert_eq!(
        cluster.raw_actions,
        vec!["CreateCluster", "DeleteCluster", "DescribeCluster", "ListClusters"]
    );
    // Built-in override for the cluster node operations
    assert_eq!(
        cluster.additional_methods,
        vec!["DescribeClusterNode", "ListClusterNodes"]
    );
}

#[test]
fn test_training_job_waits_regardless_of_states() {
    let model = sagemaker_model();
    let plan = plan_service(&model).unwrap();
    let job = plan.resource("TrainingJob").unwrap();

    assert!(job.has_object_method("wait"));
    assert!(!job.has_object_method("wait_for_status"));
    assert_eq!(job.object_methods, vec!["refresh", "stop", "wait"]);
    // ClusterName on CreateTrainingJob points at a known resource
    assert_eq!(job.chain_resource_name, vec!["Cluster"]);
}

#[test]
fn test_self_reference_is_not_a_chain_resource() {
    let model = sagemaker_model();
    let plan = plan_service(&model).unwrap();
    let group = plan.resource("ModelPackageGroup").unwrap();

    assert!(group.chain_resource_name.is_empty());
    assert_eq!(group.class_methods, vec!["create"]);
    assert!(group.resource_states.is_empty());
    assert!(group.object_methods.is_empty());
}

#[test]
fn test_unmatched_operations_excluded() {
    let model = sagemaker_model();
    let plan = plan_service(&model).unwrap();

    assert_eq!(
        plan.resource_names().collect::<Vec<_>>(),
        vec!["Cluster", "ModelPackageGroup", "TrainingJob"]
    );
    assert_eq!(
        plan.summary.unassigned_operations,
        vec!["DeleteModelPackageGroupPolicy", "Search"]
    );
    assert_eq!(plan.summary.total_operations, 10);
    assert_eq!(plan.summary.assigned_operations, 8);
    assert_eq!(plan.service.as_deref(), Some("sagemaker"));
}

#[test]
fn test_each_operation_assigned_at_most_once() {
    let model = model_from(json!({
        "operations": {
            "CreateNode": {},
            "CreateClusterNode": {},
            "CreateCluster": {},
            "DeleteClusterNode": {},
            "DeleteNode": {},
            "ListClusterNodes": {},
            "ListNodes": {},
            "AddNode": {},
            "StartClusterNode": {},
            "RegisterClusterNode": {},
            "ImportNode": {}
        }
    }));
    let plan = ResourcePlanner::new(&model)
        .with_overrides(PlanOverrides::none())
        .plan()
        .unwrap();

    let mut seen: HashMap<&str, &str> = HashMap::new();
    for record in &plan.resources {
        for action in &record.raw_actions {
            if let Some(previous) = seen.insert(action, &record.resource_name) {
                panic!(
                    "{} assigned to both {} and {}",
                    action, previous, record.resource_name
                );
            }
        }
    }
    assert_eq!(seen.len(), 11);

    // Longest suffix wins: ClusterNode operations never land on Node
    let cluster_node = plan.resource("ClusterNode").unwrap();
    assert_eq!(
        cluster_node.raw_actions,
        vec![
            "CreateClusterNode",
            "DeleteClusterNode",
            "ListClusterNodes",
            "RegisterClusterNode",
            "StartClusterNode"
        ]
    );
    let node = plan.resource("Node").unwrap();
    assert_eq!(
        node.raw_actions,
        vec!["AddNode", "CreateNode", "DeleteNode", "ImportNode", "ListNodes"]
    );
    assert_eq!(
        node.class_methods,
        vec!["add", "create", "import", "list"]
    );
}

#[test]
fn test_plural_listing_convention() {
    let model = model_from(json!({
        "operations": {
            "CreateWidget": {"input": {"shape": "Empty"}},
            "ListWidgets": {}
        },
        "shapes": {"Empty": {"type": "structure", "members": {}}}
    }));
    let plan = plan_service(&model).unwrap();
    let widget = plan.resource("Widget").unwrap();

    assert_eq!(widget.raw_actions, vec!["CreateWidget", "ListWidgets"]);
    assert_eq!(widget.class_methods, vec!["create", "list"]);
}

#[test]
fn test_chain_resource_from_create_input() {
    let model = model_from(json!({
        "operations": {
            "CreateCluster": {"input": {"shape": "CreateClusterRequest"}},
            "CreateNotebookInstance": {"input": {"shape": "CreateNotebookInstanceInput"}}
        },
        "shapes": {
            "CreateClusterRequest": {"type": "structure", "members": {}},
            "CreateNotebookInstanceInput": {
                "type": "structure",
                "members": {
                    "NotebookInstanceName": {"shape": "String"},
                    "ClusterName": {"shape": "String"},
                    "LifecycleConfigName": {"shape": "String"}
                }
            },
            "String": {"type": "string"}
        }
    }));
    let plan = plan_service(&model).unwrap();

    assert_eq!(
        plan.resource("NotebookInstance")
            .unwrap()
            .chain_resource_name,
        vec!["Cluster"]
    );
}

#[test]
fn test_only_create_inputs_name_chain_resources() {
    let model = model_from(json!({
        "operations": {
            "CreateCluster": {"input": {"shape": "Empty"}},
            "StartNotebookInstance": {"input": {"shape": "StartNotebookInstanceInput"}},
            "RegisterDevices": {"input": {"shape": "RegisterDevicesRequest"}}
        },
        "shapes": {
            "Empty": {"type": "structure", "members": {}},
            "StartNotebookInstanceInput": {
                "type": "structure",
                "members": {
                    "NotebookInstanceName": {"shape": "String"},
                    "ClusterName": {"shape": "String"}
                }
            },
            "RegisterDevicesRequest": {
                "type": "structure",
                "members": {"ClusterName": {"shape": "String"}}
            },
            "String": {"type": "string"}
        }
    }));
    let plan = plan_service(&model).unwrap();

    let notebook = plan.resource("NotebookInstance").unwrap();
    assert!(notebook.has_class_method("start"));
    assert!(notebook.chain_resource_name.is_empty());

    let devices = plan.resource("Devices").unwrap();
    assert!(devices.has_class_method("register"));
    assert!(devices.chain_resource_name.is_empty());
}

#[test]
fn test_resource_with_no_actions_left_is_still_planned() {
    // CreateExecution claims StartPipelineExecution first, leaving
    // PipelineExecution with nothing, yet CreateTrial still chains to it.
    let model = model_from(json!({
        "operations": {
            "CreateExecution": {},
            "StartPipelineExecution": {},
            "CreateTrial": {"input": {"shape": "CreateTrialRequest"}}
        },
        "shapes": {
            "CreateTrialRequest": {
                "type": "structure",
                "members": {
                    "TrialName": {"shape": "String"},
                    "PipelineExecutionName": {"shape": "String"}
                }
            },
            "String": {"type": "string"}
        }
    }));
    let plan = ResourcePlanner::new(&model)
        .with_overrides(PlanOverrides::none())
        .plan()
        .unwrap();

    assert_eq!(
        plan.resource_names().collect::<Vec<_>>(),
        vec!["Execution", "PipelineExecution", "Trial"]
    );
    assert_eq!(plan.summary.total_resources, 3);

    let execution = plan.resource("Execution").unwrap();
    assert_eq!(
        execution.raw_actions,
        vec!["CreateExecution", "StartPipelineExecution"]
    );

    let pipeline_execution = plan.resource("PipelineExecution").unwrap();
    assert!(pipeline_execution.raw_actions.is_empty());
    assert!(pipeline_execution.class_methods.is_empty());
    assert!(pipeline_execution.object_methods.is_empty());

    let trial = plan.resource("Trial").unwrap();
    assert_eq!(trial.chain_resource_name, vec!["PipelineExecution"]);
    for chained in &trial.chain_resource_name {
        assert!(
            plan.resource(chained).is_some(),
            "{} is chained but not planned",
            chained
        );
    }
}

#[test]
fn test_nested_status_chain_with_wrapped_output() {
    let model = model_from(json!({
        "operations": {
            "CreateDomain": {"input": {"shape": "Empty"}},
            "DescribeDomain": {"output": {"shape": "DescribeDomainResponse"}}
        },
        "shapes": {
            "Empty": {"type": "structure", "members": {}},
            "DescribeDomainResponse": {
                "type": "structure",
                "members": {"Domain": {"shape": "DomainDescription"}}
            },
            "DomainDescription": {
                "type": "structure",
                "members": {
                    "DomainId": {"shape": "String"},
                    "StatusDetails": {"shape": "DomainStatusDetails"}
                }
            },
            "DomainStatusDetails": {
                "type": "structure",
                "members": {
                    "Message": {"shape": "String"},
                    "Status": {"shape": "DomainStatus"}
                }
            },
            "DomainStatus": {"type": "string", "enum": ["PENDING", "IN_SERVICE", "FAILED"]},
            "String": {"type": "string"}
        }
    }));
    let plan = plan_service(&model).unwrap();
    let domain = plan.resource("Domain").unwrap();

    assert_eq!(
        domain.resource_status_chain,
        vec![
            StatusChainEntry::new("StatusDetails", "DomainStatusDetails"),
            StatusChainEntry::new("Status", "DomainStatus"),
        ]
    );
    assert_eq!(domain.resource_states, vec!["PENDING", "IN_SERVICE", "FAILED"]);
    assert!(domain.has_object_method("wait_for_status"));
}

#[test]
fn test_cyclic_status_shapes_abort() {
    let model = model_from(json!({
        "operations": {
            "CreateLoop": {"input": {"shape": "Empty"}},
            "DescribeLoop": {"output": {"shape": "LoopOutput"}}
        },
        "shapes": {
            "Empty": {"type": "structure", "members": {}},
            "LoopOutput": {
                "type": "structure",
                "members": {"LoopId": {"shape": "String"}, "Status": {"shape": "LoopStatus"}}
            },
            "LoopStatus": {
                "type": "structure",
                "members": {"InnerStatus": {"shape": "LoopOutput"}}
            },
            "String": {"type": "string"}
        }
    }));

    let result = plan_service(&model);
    assert!(matches!(result, Err(PlanError::CyclicStatusChain { .. })));
}

#[test]
fn test_missing_shape_aborts() {
    let model = model_from(json!({
        "operations": {
            "CreateThing": {"input": {"shape": "CreateThingInput"}}
        }
    }));

    let result = plan_service(&model);
    assert!(matches!(result, Err(PlanError::MissingShape(name)) if name == "CreateThingInput"));
}
