//! Common Swift source fixtures for tests.

pub const POINT: &str = r#"
// sourcery: skipEquality
struct Point {
    var x: Int
}
"#;

pub const POINT_EXTENSION: &str = r#"
extension Point {
    var y: Int
}
"#;

pub const GHOST_EXTENSION: &str = r#"
extension Ghost {
    var z: Int
}
"#;

pub const SHAPES: &str = r#"
import Foundation

protocol Drawable {
    func draw(in context: Context) throws
}

protocol Shape: Drawable {
    var area: Double { get }
}

class Base {
    let id: String = ""
}

final class Circle: Base, Shape {
    var radius: Double
    var area: Double { .pi * radius * radius }

    init(radius: Double) {
        self.radius = radius
    }

    func draw(in context: Context) throws {}
}

struct Context {}
"#;

pub const NETWORK: &str = r#"
// sourcery:file: module = "Network"
import Foundation
@testable import Core

public enum Endpoint {
    case users
    case user(id: Int)
    case search(query: String, page: Int = 1)

    public struct Response: Decodable {
        public let status: Int
        public private(set) var body: Data?
    }
}

extension Endpoint: CustomStringConvertible {
    public var description: String { "" }
}

public func request(_ endpoint: Endpoint) async throws -> Endpoint.Response {
    fatalError()
}
"#;

pub const BLOCK_ANNOTATIONS: &str = r#"
// sourcery:begin: group = "a"
struct First {}

// sourcery:begin:inner: inner
struct Second {}
// sourcery:end:inner

// sourcery: group = "direct"
struct Third {}
// sourcery:end

struct Fourth {}
"#;
