//! Default OpenAPI schema generator built on utoipa.

use utoipa::openapi::path::{HttpMethod, Operation, OperationBuilder, PathItemBuilder};
use utoipa::openapi::server::ServerBuilder;
use utoipa::openapi::tag::TagBuilder;
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder, PathsBuilder};

use keel_types::{Method, RouteMeta, SchemaContext, SchemaGenerator};

/// Schema generator assembling the document with utoipa's builders.
///
/// Deterministic over its context; the composer caches the result so this
/// runs at most once per application instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiGenerator;

impl SchemaGenerator for OpenApiGenerator {
    fn generate(&self, ctx: SchemaContext<'_>) -> OpenApi {
        let info = InfoBuilder::new()
            .title(ctx.title)
            .version(ctx.version)
            .description(Some(ctx.description))
            .build();

        // Group schema-visible routes by path, preserving registration order.
        let mut grouped: Vec<(&str, Vec<&RouteMeta>)> = Vec::new();
        for route in ctx.routes.iter().filter(|r| r.include_in_schema) {
            match grouped.iter_mut().find(|(path, _)| *path == route.path) {
                Some((_, routes)) => routes.push(route),
                None => grouped.push((&route.path, vec![route])),
            }
        }

        let mut paths = PathsBuilder::new();
        for (path, routes) in grouped {
            let mut item = PathItemBuilder::new();
            for route in routes {
                item = item.operation(http_method(route.method), operation(route));
            }
            paths = paths.path(path, item.build());
        }

        let tags = (!ctx.tags.is_empty()).then(|| {
            ctx.tags
                .iter()
                .map(|tag| {
                    TagBuilder::new()
                        .name(&tag.name)
                        .description(tag.description.as_deref())
                        .build()
                })
                .collect::<Vec<_>>()
        });

        let servers = (!ctx.servers.is_empty()).then(|| {
            ctx.servers
                .iter()
                .map(|server| {
                    ServerBuilder::new()
                        .url(&server.url)
                        .description(server.description.as_deref())
                        .build()
                })
                .collect::<Vec<_>>()
        });

        OpenApiBuilder::new()
            .info(info)
            .paths(paths.build())
            .tags(tags)
            .servers(servers)
            .build()
    }
}

fn operation(route: &RouteMeta) -> Operation {
    let mut op = OperationBuilder::new()
        .summary(route.summary.as_deref())
        .description(route.description.as_deref())
        .operation_id(route.operation_id.as_deref())
        .build();
    if !route.tags.is_empty() {
        op.tags = Some(route.tags.clone());
    }
    op
}

fn http_method(method: Method) -> HttpMethod {
    match method {
        Method::Get => HttpMethod::Get,
        Method::Post => HttpMethod::Post,
        Method::Put => HttpMethod::Put,
        Method::Delete => HttpMethod::Delete,
        Method::Patch => HttpMethod::Patch,
        Method::Head => HttpMethod::Head,
        Method::Options => HttpMethod::Options,
        Method::Trace => HttpMethod::Trace,
    }
}
